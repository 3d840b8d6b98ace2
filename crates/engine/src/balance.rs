//! Debit/credit arithmetic shared by vouchers, adjustments and the ledger.

use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// A line must carry an amount on at least one side and never a negative one.
pub fn check_amounts(debit: i64, credit: i64) -> ResultEngine<()> {
    if debit < 0 {
        return Err(EngineError::InvalidInput(
            "debit must not be negative".to_owned(),
        ));
    }
    if credit < 0 {
        return Err(EngineError::InvalidInput(
            "credit must not be negative".to_owned(),
        ));
    }
    if debit == 0 && credit == 0 {
        return Err(EngineError::InvalidInput(
            "debit and credit cannot both be zero".to_owned(),
        ));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub total_debit: i64,
    pub total_credit: i64,
    /// Debits minus credits; zero when the lines balance.
    pub balance: i64,
    pub is_balanced: bool,
}

/// Sums a set of debit/credit lines without judging them.
pub fn summarize<I>(lines: I) -> BalanceSummary
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let mut total_debit = 0_i64;
    let mut total_credit = 0_i64;
    for (debit, credit) in lines {
        total_debit += debit;
        total_credit += credit;
    }
    BalanceSummary {
        total_debit,
        total_credit,
        balance: total_debit - total_credit,
        is_balanced: total_debit == total_credit,
    }
}

/// Like [`summarize`] but validates every line and requires the totals to
/// match. Posting paths go through this one.
pub fn summarize_strict<I>(lines: I) -> ResultEngine<BalanceSummary>
where
    I: IntoIterator<Item = (i64, i64)>,
{
    let mut total_debit = 0_i64;
    let mut total_credit = 0_i64;
    let mut seen = false;
    for (debit, credit) in lines {
        check_amounts(debit, credit)?;
        total_debit += debit;
        total_credit += credit;
        seen = true;
    }
    if !seen {
        return Err(EngineError::InvalidInput(
            "at least one entry is required".to_owned(),
        ));
    }
    if total_debit != total_credit {
        return Err(EngineError::Unbalanced(format!(
            "debits {total_debit} do not equal credits {total_credit}"
        )));
    }
    Ok(BalanceSummary {
        total_debit,
        total_credit,
        balance: 0,
        is_balanced: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_amounts_guards_both_sides() {
        assert!(check_amounts(100, 0).is_ok());
        assert!(check_amounts(0, 100).is_ok());
        assert!(check_amounts(50, 50).is_ok());
        assert!(check_amounts(0, 0).is_err());
        assert!(check_amounts(-1, 0).is_err());
        assert!(check_amounts(0, -1).is_err());
    }

    #[test]
    fn summarize_reports_the_difference() {
        let summary = summarize([(1_000, 0), (500, 0), (0, 1_200)]);
        assert_eq!(summary.total_debit, 1_500);
        assert_eq!(summary.total_credit, 1_200);
        assert_eq!(summary.balance, 300);
        assert!(!summary.is_balanced);

        let summary = summarize(std::iter::empty());
        assert!(summary.is_balanced);
        assert_eq!(summary.balance, 0);
    }

    #[test]
    fn summarize_strict_rejects_imbalance() {
        let summary = summarize_strict([(1_000, 0), (0, 1_000)]).unwrap();
        assert!(summary.is_balanced);

        let err = summarize_strict([(1_000, 0), (0, 900)]).unwrap_err();
        assert_eq!(
            err,
            EngineError::Unbalanced("debits 1000 do not equal credits 900".to_owned())
        );
    }

    #[test]
    fn summarize_strict_rejects_empty_and_bad_lines() {
        assert!(summarize_strict(std::iter::empty()).is_err());
        assert!(summarize_strict([(0, 0)]).is_err());
        assert!(summarize_strict([(-5, 0), (0, -5)]).is_err());
    }
}
