use rand::Rng;

use crate::config::GridSize;
use crate::snake::{Position, Snake};

/// Draws uniformly random cells until one is free of the snake.
///
/// Callers must leave at least one free cell on the board; the draw loop has
/// no retry bound.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Position {
    debug_assert!(
        snake.len() < bounds.total_cells(),
        "place_food: no free cells on the board ({}x{})",
        bounds.width,
        bounds.height,
    );

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::GridSize;
    use crate::snake::{Position, Snake};

    use super::place_food;

    #[test]
    fn food_never_overlaps_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position { x: 2, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 0, y: 0 },
        ]);
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..100 {
            let food = place_food(&mut rng, bounds, &snake);
            assert!(!snake.occupies(food));
            assert!(food.is_within_bounds(bounds));
        }
    }

    #[test]
    fn single_free_cell_is_found() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize::square(2);
        let snake = Snake::from_segments(vec![
            Position { x: 0, y: 0 },
            Position { x: 1, y: 0 },
            Position { x: 1, y: 1 },
        ]);

        let food = place_food(&mut rng, bounds, &snake);

        assert_eq!(food, Position { x: 0, y: 1 });
    }

    #[test]
    fn same_seed_places_same_food() {
        let snake = Snake::new(Position { x: 10, y: 10 });
        let mut first = StdRng::seed_from_u64(99);
        let mut second = StdRng::seed_from_u64(99);

        assert_eq!(
            place_food(&mut first, GridSize::DEFAULT, &snake),
            place_food(&mut second, GridSize::DEFAULT, &snake)
        );
    }
}
