//! GST rate modelling and input/output tax summaries

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::reports::in_range;
use crate::types::{Purchase, Sale};

/// GST rate structure for Indian taxation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRate {
    /// Total GST rate percentage (e.g., 18.0 for 18%)
    pub total_rate: BigDecimal,
    /// CGST rate percentage (Central GST)
    pub cgst_rate: BigDecimal,
    /// SGST rate percentage (State GST)
    pub sgst_rate: BigDecimal,
    /// IGST rate percentage (Integrated GST)
    pub igst_rate: BigDecimal,
}

/// A GST amount broken into its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSplit {
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub igst: BigDecimal,
}

impl GstRate {
    /// Create a new GST rate with intra-state components (CGST + SGST)
    pub fn intra_state(total_rate: BigDecimal) -> Self {
        let half_rate = &total_rate / BigDecimal::from(2);
        Self {
            total_rate,
            cgst_rate: half_rate.clone(),
            sgst_rate: half_rate,
            igst_rate: BigDecimal::from(0),
        }
    }

    /// Create a new GST rate with inter-state components (IGST)
    pub fn inter_state(total_rate: BigDecimal) -> Self {
        Self {
            total_rate: total_rate.clone(),
            cgst_rate: BigDecimal::from(0),
            sgst_rate: BigDecimal::from(0),
            igst_rate: total_rate,
        }
    }

    /// Validate that the GST rate structure is consistent
    pub fn validate(&self) -> Result<(), GstError> {
        let calculated_total = &self.cgst_rate + &self.sgst_rate + &self.igst_rate;

        if calculated_total != self.total_rate {
            return Err(GstError::InvalidRate(format!(
                "GST components don't add up to total rate: {} != {}",
                calculated_total, self.total_rate
            )));
        }

        if self.igst_rate == BigDecimal::from(0) && self.cgst_rate != self.sgst_rate {
            return Err(GstError::InvalidRate(
                "CGST and SGST rates must be equal for intra-state transactions".to_string(),
            ));
        }

        if self.igst_rate > BigDecimal::from(0)
            && (self.cgst_rate > BigDecimal::from(0) || self.sgst_rate > BigDecimal::from(0))
        {
            return Err(GstError::InvalidRate(
                "Only IGST should be applicable for inter-state transactions".to_string(),
            ));
        }

        Ok(())
    }

    /// Split a tax amount across the rate's components, proportionally.
    ///
    /// For an intra-state rate this is the even CGST/SGST split; for an
    /// inter-state rate the whole amount lands on IGST. A zero total rate
    /// splits to all zeroes.
    pub fn split_amount(&self, gst_amount: &BigDecimal) -> GstSplit {
        let zero = BigDecimal::from(0);
        if self.total_rate == zero {
            return GstSplit {
                cgst: zero.clone(),
                sgst: zero.clone(),
                igst: zero,
            };
        }

        GstSplit {
            cgst: (gst_amount * &self.cgst_rate) / &self.total_rate,
            sgst: (gst_amount * &self.sgst_rate) / &self.total_rate,
            igst: (gst_amount * &self.igst_rate) / &self.total_rate,
        }
    }
}

/// Accumulated figures for one distinct GST rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstRateLine {
    /// Effective rate percentage derived from the records
    pub rate: BigDecimal,
    /// Sum of taxable values (before GST) at this rate
    pub taxable_value: BigDecimal,
    pub cgst: BigDecimal,
    pub sgst: BigDecimal,
    pub total_tax: BigDecimal,
}

/// Rate-wise breakup for one direction of trade
///
/// The inter-state bucket is structurally present but never populated: only
/// intra-state activity is modelled, so every line lands in `intra_state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstSection {
    pub intra_state: Vec<GstRateLine>,
    pub inter_state: Vec<GstRateLine>,
}

/// GST input/output summary over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Output tax collected on sales
    pub outward: GstSection,
    /// Input tax credit on purchases
    pub inward: GstSection,
    pub total_tax_payable: BigDecimal,
    pub total_tax_paid: BigDecimal,
    pub net_tax_liability: BigDecimal,
}

/// GST-related errors
#[derive(Debug, thiserror::Error)]
pub enum GstError {
    #[error("Invalid GST rate: {0}")]
    InvalidRate(String),
}

// (taxable value, gst amount) accumulated per distinct derived rate
type RateBuckets = BTreeMap<BigDecimal, (BigDecimal, BigDecimal)>;

fn derived_rate(gst_amount: &BigDecimal, total_value: &BigDecimal) -> BigDecimal {
    let zero = BigDecimal::from(0);
    if *total_value == zero {
        return zero;
    }
    ((gst_amount * BigDecimal::from(100)) / total_value).normalized()
}

fn accumulate(buckets: &mut RateBuckets, total_value: &BigDecimal, gst_amount: &BigDecimal) {
    let rate = derived_rate(gst_amount, total_value);
    let (taxable, gst) = buckets
        .entry(rate)
        .or_insert_with(|| (BigDecimal::from(0), BigDecimal::from(0)));
    *taxable += total_value;
    *gst += gst_amount;
}

fn section_from(buckets: RateBuckets) -> GstSection {
    let intra_state = buckets
        .into_iter()
        .map(|(rate, (taxable_value, gst))| {
            let split = GstRate::intra_state(rate.clone()).split_amount(&gst);
            GstRateLine {
                rate,
                taxable_value,
                cgst: split.cgst,
                sgst: split.sgst,
                total_tax: gst,
            }
        })
        .collect();

    GstSection {
        intra_state,
        inter_state: Vec::new(),
    }
}

fn section_tax(section: &GstSection) -> BigDecimal {
    section
        .intra_state
        .iter()
        .map(|line| &line.cgst + &line.sgst)
        .sum()
}

/// Derive the GST summary over `[start_date, end_date]` inclusive.
///
/// Sales and purchases (not vouchers) are grouped by their derived rate
/// (`gst_amount / total_value * 100`); each rate line's GST is split evenly
/// into CGST and SGST. The net liability is output tax minus input credit.
pub fn gst_summary(
    sales: &[Sale],
    purchases: &[Purchase],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> GstReport {
    let mut outward_buckets = RateBuckets::new();
    for sale in sales {
        if !in_range(sale.date, start_date, end_date) {
            continue;
        }
        accumulate(&mut outward_buckets, &sale.total_value, &sale.gst_amount);
    }

    let mut inward_buckets = RateBuckets::new();
    for purchase in purchases {
        if !in_range(purchase.date, start_date, end_date) {
            continue;
        }
        accumulate(
            &mut inward_buckets,
            &purchase.total_value,
            &purchase.gst_amount,
        );
    }

    let outward = section_from(outward_buckets);
    let inward = section_from(inward_buckets);

    let total_tax_payable = section_tax(&outward);
    let total_tax_paid = section_tax(&inward);
    let net_tax_liability = &total_tax_payable - &total_tax_paid;

    GstReport {
        start_date,
        end_date,
        outward,
        inward,
        total_tax_payable,
        total_tax_paid,
        net_tax_liability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn sale(id: &str, on: NaiveDate, value: i64, gst: i64) -> Sale {
        Sale {
            id: id.to_string(),
            product_id: "p1".to_string(),
            date: on,
            quantity: BigDecimal::from(1),
            rate: BigDecimal::from(value),
            total_value: BigDecimal::from(value),
            gst_amount: BigDecimal::from(gst),
            grand_total: BigDecimal::from(value + gst),
        }
    }

    fn purchase(id: &str, on: NaiveDate, value: i64, gst: i64) -> Purchase {
        Purchase {
            id: id.to_string(),
            product_id: "p1".to_string(),
            date: on,
            quantity: BigDecimal::from(1),
            rate: BigDecimal::from(value),
            total_value: BigDecimal::from(value),
            gst_amount: BigDecimal::from(gst),
            grand_total: BigDecimal::from(value + gst),
        }
    }

    #[test]
    fn intra_state_rate_splits_evenly() {
        let rate = GstRate::intra_state(BigDecimal::from(18));
        assert_eq!(rate.cgst_rate, BigDecimal::from(9));
        assert_eq!(rate.sgst_rate, BigDecimal::from(9));
        assert_eq!(rate.igst_rate, BigDecimal::from(0));
        assert!(rate.validate().is_ok());

        let split = rate.split_amount(&BigDecimal::from(180));
        assert_eq!(split.cgst, BigDecimal::from(90));
        assert_eq!(split.sgst, BigDecimal::from(90));
        assert_eq!(split.igst, BigDecimal::from(0));
    }

    #[test]
    fn inter_state_rate_goes_to_igst() {
        let rate = GstRate::inter_state(BigDecimal::from(18));
        assert!(rate.validate().is_ok());

        let split = rate.split_amount(&BigDecimal::from(180));
        assert_eq!(split.cgst, BigDecimal::from(0));
        assert_eq!(split.igst, BigDecimal::from(180));
    }

    #[test]
    fn lopsided_split_rejected() {
        let rate = GstRate {
            total_rate: BigDecimal::from(18),
            cgst_rate: BigDecimal::from(10),
            sgst_rate: BigDecimal::from(8),
            igst_rate: BigDecimal::from(0),
        };
        assert!(rate.validate().is_err());
    }

    #[test]
    fn summary_groups_by_derived_rate() {
        let sales = vec![
            sale("s1", date(3, 5), 1000, 180),
            sale("s2", date(3, 9), 500, 90),
            sale("s3", date(3, 12), 2000, 100), // 5%
        ];

        let report = gst_summary(&sales, &[], date(3, 1), date(3, 31));

        assert_eq!(report.outward.intra_state.len(), 2);
        let five = &report.outward.intra_state[0];
        assert_eq!(five.rate, BigDecimal::from(5));
        assert_eq!(five.taxable_value, BigDecimal::from(2000));
        assert_eq!(five.cgst, BigDecimal::from(50));
        assert_eq!(five.sgst, BigDecimal::from(50));

        let eighteen = &report.outward.intra_state[1];
        assert_eq!(eighteen.rate, BigDecimal::from(18));
        assert_eq!(eighteen.taxable_value, BigDecimal::from(1500));
        assert_eq!(eighteen.cgst, BigDecimal::from(135));
        assert_eq!(eighteen.sgst, BigDecimal::from(135));
        assert_eq!(eighteen.total_tax, BigDecimal::from(270));

        assert!(report.outward.inter_state.is_empty());
        assert_eq!(report.total_tax_payable, BigDecimal::from(370));
    }

    #[test]
    fn net_liability_offsets_input_credit() {
        let sales = vec![sale("s1", date(3, 5), 1000, 180)];
        let purchases = vec![purchase("p1", date(3, 7), 400, 72)];

        let report = gst_summary(&sales, &purchases, date(3, 1), date(3, 31));

        assert_eq!(report.total_tax_payable, BigDecimal::from(180));
        assert_eq!(report.total_tax_paid, BigDecimal::from(72));
        assert_eq!(report.net_tax_liability, BigDecimal::from(108));
        assert!(report.inward.inter_state.is_empty());
    }

    #[test]
    fn out_of_range_records_excluded() {
        let sales = vec![
            sale("s1", date(2, 28), 1000, 180),
            sale("s2", date(3, 1), 1000, 180),
        ];

        let report = gst_summary(&sales, &[], date(3, 1), date(3, 31));
        assert_eq!(report.total_tax_payable, BigDecimal::from(180));
    }

    #[test]
    fn zero_value_sale_contributes_zero_rate_line() {
        let sales = vec![sale("s1", date(3, 5), 0, 0)];
        let report = gst_summary(&sales, &[], date(3, 1), date(3, 31));

        assert_eq!(report.outward.intra_state.len(), 1);
        assert_eq!(report.outward.intra_state[0].rate, BigDecimal::from(0));
        assert_eq!(report.total_tax_payable, BigDecimal::from(0));
    }
}
