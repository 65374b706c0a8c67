//! Exchange filter: the single place the excluded exchange is enforced.

use crate::directory::TickerDirectory;

/// Passes an article iff at least one detected code is on a target exchange.
///
/// An article with no detected code at all is rejected, as is one whose
/// codes are all on the excluded exchange.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeFilter<'d> {
    directory: &'d TickerDirectory,
}

impl<'d> ExchangeFilter<'d> {
    pub fn new(directory: &'d TickerDirectory) -> Self {
        Self { directory }
    }

    pub fn passes<S: AsRef<str>>(&self, codes: &[S]) -> bool {
        codes.iter().any(|code| {
            self.directory
                .exchange_of(code.as_ref())
                .is_some_and(|e| e.is_target())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Exchange, TickerEntry};

    fn directory() -> TickerDirectory {
        TickerDirectory::build(vec![
            TickerEntry::new("SHS", Exchange::Hnx, ""),
            TickerEntry::new("LPB", Exchange::Upcom, ""),
            TickerEntry::new("VCB", Exchange::Hose, ""),
            TickerEntry::new("FPT", Exchange::Hose, ""),
        ])
    }

    #[test]
    fn empty_is_rejected() {
        let dir = directory();
        assert!(!ExchangeFilter::new(&dir).passes::<&str>(&[]));
    }

    #[test]
    fn excluded_only_is_rejected() {
        let dir = directory();
        assert!(!ExchangeFilter::new(&dir).passes(&["VCB", "FPT"]));
    }

    #[test]
    fn any_target_code_passes() {
        let dir = directory();
        let f = ExchangeFilter::new(&dir);
        assert!(f.passes(&["VCB", "LPB"]));
        assert!(f.passes(&["SHS".to_string()]));
    }

    #[test]
    fn unknown_codes_do_not_count() {
        let dir = directory();
        assert!(!ExchangeFilter::new(&dir).passes(&["XYZ"]));
    }
}
