use std::io::{self, Write};

use crate::game::GameEvent;

/// Food, game over and a win ring the bell; a high-score change does not.
#[must_use]
pub fn rings_bell(event: GameEvent) -> bool {
    !matches!(event, GameEvent::HighScoreChanged(_))
}

/// Logs a tick event and, when `bell` is set, rings the terminal bell on `out`.
///
/// A failed bell write is logged and dropped so the game keeps running.
pub fn announce<W: Write>(out: &mut W, event: GameEvent, bell: bool) {
    log::debug!("{event:?}");

    if !bell || !rings_bell(event) {
        return;
    }
    if let Err(error) = ring(out) {
        log::warn!("terminal bell failed: {error}");
    }
}

fn ring<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}
