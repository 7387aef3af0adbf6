//! Line protocol spoken by the hand-tracking process.
//!
//! One event per line, newline terminated:
//!
//! - `"<vx> <vy>"` — two float tokens, a relative look-delta
//! - `"SHOT <strength>"` — a fire command with normalized intensity
//!
//! Anything else on stdout is ignored. Stderr is never parsed.

/// A typed control event decoded from one protocol line.
///
/// Only [`parse_line`] creates these; consumers never mutate them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Relative look-delta for the current tick.
    Vector { vx: f32, vy: f32 },
    /// Fire command with normalized intensity.
    Shot { strength: f32 },
}

/// Event kind discriminant, used as the slot key in the latest-value store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Vector,
    Shot,
}

impl ControlEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ControlEvent::Vector { .. } => EventKind::Vector,
            ControlEvent::Shot { .. } => EventKind::Shot,
        }
    }
}

/// Parses one protocol line into a [`ControlEvent`].
///
/// Returns `None` for empty, whitespace-only, or malformed lines;
/// a flaky tracker feed must never take the control loop down, so
/// unrecognized input is dropped here rather than reported.
///
/// Float parsing goes through [`str::parse`], which always uses a
/// period as the decimal separator no matter the host locale. The
/// tracker emits exactly that format.
///
/// # Examples
///
/// ```rust
/// use handbridge::protocol::{parse_line, ControlEvent};
///
/// assert_eq!(
///     parse_line("SHOT 0.5"),
///     Some(ControlEvent::Shot { strength: 0.5 })
/// );
/// assert_eq!(
///     parse_line("0.1 -0.2"),
///     Some(ControlEvent::Vector { vx: 0.1, vy: -0.2 })
/// );
/// assert_eq!(parse_line("telemetry: ok"), None);
/// ```
pub fn parse_line(line: &str) -> Option<ControlEvent> {
    let mut tokens = line.split_whitespace();

    let first = tokens.next()?;

    if first == "SHOT" {
        let strength = tokens.next()?.parse::<f32>().ok()?;
        // Trailing tokens make the line malformed, not a shot.
        if tokens.next().is_some() {
            return None;
        }
        return Some(ControlEvent::Shot { strength });
    }

    let vx = first.parse::<f32>().ok()?;
    let vy = tokens.next()?.parse::<f32>().ok()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(ControlEvent::Vector { vx, vy })
}
