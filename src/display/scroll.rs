//! Hardware horizontal scroll state and parameter translation.

use crate::command::consts::PAGE_MAX;
use crate::error::Error;

/// Controller frame interval codes, indexed by user rate 1 (256 frames between steps) through 8
/// (2 frames). The controller's own encoding is not ordered by step interval:
///
/// | rate | frames | code |
/// |------|--------|------|
/// | 1    | 256    | 0x03 |
/// | 2    | 128    | 0x02 |
/// | 3    | 64     | 0x01 |
/// | 4    | 25     | 0x06 |
/// | 5    | 5      | 0x00 |
/// | 6    | 4      | 0x05 |
/// | 7    | 3      | 0x04 |
/// | 8    | 2      | 0x07 |
pub const SCROLL_RATES: [u8; 8] = [0x03, 0x02, 0x01, 0x06, 0x00, 0x05, 0x04, 0x07];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScrollState {
    Idle,
    Scrolling,
}

/// Check scroll arguments and translate `rate` to the controller code. Nothing is sent if this
/// fails.
pub(crate) fn validate<E>(
    state: ScrollState,
    start_page: u8,
    end_page: u8,
    rate: u8,
) -> Result<u8, Error<E>> {
    if state == ScrollState::Scrolling {
        return Err(Error::AlreadyScrolling);
    }
    if start_page > end_page || end_page > PAGE_MAX {
        return Err(Error::PageRange {
            start: start_page,
            end: end_page,
        });
    }
    match rate {
        1..=8 => Ok(SCROLL_RATES[rate as usize - 1]),
        _ => Err(Error::ScrollRate(rate)),
    }
}
