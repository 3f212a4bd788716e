use std::collections::BTreeMap;

use super::model::SalaryRecord;

/// Number of equal-width salary histogram bins.
pub const HISTOGRAM_BINS: usize = 30;
/// How many roles the top-role table keeps.
pub const TOP_ROLES: usize = 10;
/// Role whose per-country mean salary is charted.
pub const FEATURED_ROLE: &str = "Data Scientist";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Tunables for the derived chart tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub histogram_bins: usize,
    pub top_roles: usize,
    pub featured_role: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            histogram_bins: HISTOGRAM_BINS,
            top_roles: TOP_ROLES,
            featured_role: FEATURED_ROLE.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub count: usize,
    /// Mode of the role column, `""` for an empty view.
    pub most_frequent_role: String,
}

/// Compute [`Metrics`] over `subset`.
///
/// An empty subset yields the zero sentinel (`Metrics::default()`), so the
/// caller never has to branch on emptiness to show the metric cards.
pub fn summarize(subset: &[&SalaryRecord]) -> Metrics {
    if subset.is_empty() {
        return Metrics::default();
    }

    let total: f64 = subset.iter().map(|r| r.salary_usd).sum();
    let max_salary = subset
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::NEG_INFINITY, f64::max);

    Metrics {
        mean_salary: total / subset.len() as f64,
        max_salary,
        count: subset.len(),
        most_frequent_role: mode_role(subset),
    }
}

/// Most frequent role. Ties go to the role that sorts first by name.
fn mode_role(subset: &[&SalaryRecord]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in subset {
        *counts.entry(rec.role.as_str()).or_default() += 1;
    }
    // `max_by_key` keeps the last maximum, so walk names in reverse.
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(role, _)| role.to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Derived chart tables
// ---------------------------------------------------------------------------

/// Mean salary of one role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSalary {
    pub role: String,
    pub mean_salary: f64,
}

/// Mean salary of the featured role in one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySalary {
    pub country: String,
    pub mean_salary: f64,
}

/// Equal-width salary histogram. Bin `i` covers
/// `[min + i * bin_width, min + (i + 1) * bin_width)`; the last bin also
/// holds the maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bucket `values` into `bins` equal-width bins spanning their range.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        if values.is_empty() {
            return Histogram {
                min: 0.0,
                bin_width: 0.0,
                counts: vec![0; bins],
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        let bin_width = if range > 0.0 { range / bins as f64 } else { 1.0 };

        let mut hist = Histogram {
            min,
            bin_width,
            counts: vec![0; bins],
        };
        for &v in values {
            let idx = hist.bin_index(v);
            hist.counts[idx] += 1;
        }
        hist
    }

    /// Bin holding `v`, consistent with [`Histogram::bin_range`].
    pub fn bin_index(&self, v: f64) -> usize {
        let last = self.counts.len().saturating_sub(1);
        let guess = ((v - self.min) / self.bin_width).floor().max(0.0) as usize;
        let mut idx = guess.min(last);
        // The division can land one bin off the edges `bin_range` reports.
        while idx < last && v >= self.lower_edge(idx + 1) {
            idx += 1;
        }
        while idx > 0 && v < self.lower_edge(idx) {
            idx -= 1;
        }
        idx
    }

    /// `(lower, upper)` bounds of bin `i`. The upper bound is the next bin's
    /// lower bound.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        (self.lower_edge(i), self.lower_edge(i + 1))
    }

    fn lower_edge(&self, i: usize) -> f64 {
        self.min + i as f64 * self.bin_width
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Everything the four charts need.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// Highest-paid roles, descending by mean salary.
    pub top_roles: Vec<RoleSalary>,
    pub histogram: Histogram,
    /// Records per remote-work mode, most common first.
    pub remote_counts: Vec<(String, usize)>,
    /// Featured-role mean salary per country, sorted by country code.
    pub country_means: Vec<CountrySalary>,
}

/// Compute every derived chart table from `subset`.
///
/// Callers check emptiness first and show a "no data" placeholder instead;
/// an empty subset still produces empty tables rather than panicking.
pub fn derive(subset: &[&SalaryRecord], options: &ChartOptions) -> ChartData {
    ChartData {
        top_roles: top_roles_by_mean(subset, options.top_roles),
        histogram: salary_histogram(subset, options.histogram_bins),
        remote_counts: remote_counts(subset),
        country_means: country_means(subset, &options.featured_role),
    }
}

/// Group by role, average salary, keep the `n` highest (descending).
/// Equal means keep role-name order.
pub fn top_roles_by_mean(subset: &[&SalaryRecord], n: usize) -> Vec<RoleSalary> {
    let mut roles: Vec<RoleSalary> = mean_by(subset, |r| r.role.as_str())
        .into_iter()
        .map(|(role, mean_salary)| RoleSalary {
            role: role.to_string(),
            mean_salary,
        })
        .collect();
    roles.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    roles.truncate(n);
    roles
}

pub fn salary_histogram(subset: &[&SalaryRecord], bins: usize) -> Histogram {
    let salaries: Vec<f64> = subset.iter().map(|r| r.salary_usd).collect();
    Histogram::from_values(&salaries, bins)
}

/// Records per remote-work mode, sorted by count (descending) then name.
pub fn remote_counts(subset: &[&SalaryRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in subset {
        *counts.entry(rec.remote.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(mode, n)| (mode.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Mean salary per residence country among records whose role is `role`.
pub fn country_means(subset: &[&SalaryRecord], role: &str) -> Vec<CountrySalary> {
    let matching: Vec<&SalaryRecord> = subset.iter().copied().filter(|r| r.role == role).collect();
    mean_by(&matching, |r| r.country.as_str())
        .into_iter()
        .map(|(country, mean_salary)| CountrySalary {
            country: country.to_string(),
            mean_salary,
        })
        .collect()
}

/// Mean salary per key, keys in sorted order.
fn mean_by<'a, F>(subset: &[&'a SalaryRecord], key: F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&'a SalaryRecord) -> &'a str,
{
    let mut sums: BTreeMap<&'a str, (f64, usize)> = BTreeMap::new();
    for &rec in subset {
        let entry = sums.entry(key(rec)).or_default();
        entry.0 += rec.salary_usd;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(k, (sum, n))| (k, sum / n as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use proptest::prelude::*;

    fn refs(records: &[SalaryRecord]) -> Vec<&SalaryRecord> {
        records.iter().collect()
    }

    #[test]
    fn empty_subset_gives_zero_sentinel() {
        let m = summarize(&[]);
        assert_eq!(m.count, 0);
        assert_eq!(m.mean_salary, 0.0);
        assert_eq!(m.max_salary, 0.0);
        assert_eq!(m.most_frequent_role, "");
    }

    #[test]
    fn mean_max_count() {
        let records = vec![
            record(2023, "Senior", "Large", "A", 100.0, "USA"),
            record(2023, "Senior", "Large", "B", 200.0, "USA"),
            record(2023, "Senior", "Large", "B", 300.0, "USA"),
        ];
        let m = summarize(&refs(&records));
        assert!((m.mean_salary - 200.0).abs() < 1e-9);
        assert_eq!(m.max_salary, 300.0);
        assert_eq!(m.count, 3);
        assert_eq!(m.most_frequent_role, "B");
    }

    #[test]
    fn mode_tie_goes_to_first_name() {
        let records = vec![
            record(2023, "Senior", "Large", "Zeta", 1.0, "USA"),
            record(2023, "Senior", "Large", "Alpha", 1.0, "USA"),
            record(2023, "Senior", "Large", "Zeta", 1.0, "USA"),
            record(2023, "Senior", "Large", "Alpha", 1.0, "USA"),
            record(2023, "Senior", "Large", "Mid", 1.0, "USA"),
        ];
        assert_eq!(summarize(&refs(&records)).most_frequent_role, "Alpha");
    }

    #[test]
    fn single_senior_scientist_summary() {
        let records = vec![record(2023, "Senior", "Large", "Data Scientist", 100_000.0, "USA")];
        let m = summarize(&refs(&records));
        assert_eq!(m.mean_salary, 100_000.0);
        assert_eq!(m.max_salary, 100_000.0);
        assert_eq!(m.count, 1);
        assert_eq!(m.most_frequent_role, "Data Scientist");
    }

    #[test]
    fn top_roles_capped_and_descending() {
        let records: Vec<SalaryRecord> = (0..15)
            .map(|i| record(2023, "Senior", "Large", &format!("Role {i:02}"), 1_000.0 * i as f64, "USA"))
            .collect();
        let top = top_roles_by_mean(&refs(&records), TOP_ROLES);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].role, "Role 14");
        assert_eq!(top[9].role, "Role 05");
        assert!(top.windows(2).all(|w| w[0].mean_salary >= w[1].mean_salary));
    }

    #[test]
    fn top_roles_average_per_group() {
        let records = vec![
            record(2023, "Senior", "Large", "A", 100.0, "USA"),
            record(2023, "Senior", "Large", "A", 300.0, "USA"),
            record(2023, "Senior", "Large", "B", 150.0, "USA"),
        ];
        let top = top_roles_by_mean(&refs(&records), TOP_ROLES);
        assert_eq!(
            top,
            vec![
                RoleSalary { role: "A".into(), mean_salary: 200.0 },
                RoleSalary { role: "B".into(), mean_salary: 150.0 },
            ]
        );
    }

    #[test]
    fn histogram_bounds() {
        let h = Histogram::from_values(&[0.0, 10.0, 30.0], 3);
        assert_eq!(h.counts, vec![1, 1, 1]);
        assert_eq!(h.bin_range(2), (20.0, 30.0));

        // Lower bound inclusive, upper exclusive except for the last bin.
        let h = Histogram::from_values(&[0.0, 9.999, 10.0, 20.0, 30.0], 3);
        assert_eq!(h.counts, vec![2, 1, 2]);
    }

    #[test]
    fn histogram_edge_values_land_in_their_own_bin() {
        let max = 1.1099999999999999;
        let h = Histogram::from_values(&[0.0, max], 30);
        let lo = h.bin_range(15).0;
        assert_eq!(h.bin_index(lo), 15);

        let h = Histogram::from_values(&[0.0, lo, max], 30);
        assert_eq!(h.counts[15], 1);
        assert_eq!(h.counts[14], 0);
    }

    #[test]
    fn histogram_of_identical_salaries() {
        let h = Histogram::from_values(&[5.0, 5.0], HISTOGRAM_BINS);
        assert_eq!(h.counts.len(), HISTOGRAM_BINS);
        assert_eq!(h.counts[0], 2);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn remote_counts_most_common_first() {
        let mut records = vec![
            record(2023, "Senior", "Large", "A", 1.0, "USA"),
            record(2023, "Senior", "Large", "A", 1.0, "USA"),
            record(2023, "Senior", "Large", "A", 1.0, "USA"),
        ];
        records[0].remote = "Presencial".into();
        let counts = remote_counts(&refs(&records));
        assert_eq!(
            counts,
            vec![("Remote".to_string(), 2), ("Presencial".to_string(), 1)]
        );
    }

    #[test]
    fn country_means_only_for_featured_role() {
        let records = vec![
            record(2023, "Senior", "Large", FEATURED_ROLE, 100.0, "USA"),
            record(2023, "Senior", "Large", FEATURED_ROLE, 200.0, "USA"),
            record(2023, "Senior", "Large", FEATURED_ROLE, 50.0, "BRA"),
            record(2023, "Senior", "Large", "Analyst", 999.0, "DEU"),
        ];
        let means = country_means(&refs(&records), FEATURED_ROLE);
        assert_eq!(
            means,
            vec![
                CountrySalary { country: "BRA".into(), mean_salary: 50.0 },
                CountrySalary { country: "USA".into(), mean_salary: 150.0 },
            ]
        );

        let analysts = vec![record(2023, "Senior", "Large", "Analyst", 1.0, "DEU")];
        assert!(country_means(&refs(&analysts), FEATURED_ROLE).is_empty());
    }

    #[test]
    fn derive_on_empty_subset_does_not_panic() {
        let charts = derive(&[], &ChartOptions::default());
        assert!(charts.top_roles.is_empty());
        assert_eq!(charts.histogram.total(), 0);
        assert!(charts.remote_counts.is_empty());
        assert!(charts.country_means.is_empty());
    }

    proptest! {
        #[test]
        fn histogram_counts_every_salary(
            salaries in prop::collection::vec(0.0..1_000_000.0f64, 1..200),
            bins in 1usize..50,
        ) {
            let h = Histogram::from_values(&salaries, bins);
            prop_assert_eq!(h.counts.len(), bins);
            prop_assert_eq!(h.total(), salaries.len());
        }

        #[test]
        fn every_value_lies_in_its_bin_range(
            k in 1u32..2000,
            bins in 1usize..50,
            picks in prop::collection::vec(0usize..50, 0..20),
        ) {
            let max = k as f64 * 0.37;
            let base = Histogram::from_values(&[0.0, max], bins);
            let mut values = vec![0.0, max];
            values.extend(picks.iter().map(|&i| base.bin_range(i % bins).0));

            let h = Histogram::from_values(&values, bins);
            let last = bins - 1;
            for &v in &values {
                let idx = h.bin_index(v);
                let (lo, hi) = h.bin_range(idx);
                prop_assert!(v >= lo, "{v} below bin {idx} [{lo}, {hi})");
                prop_assert!(idx == last || v < hi, "{v} above bin {idx} [{lo}, {hi})");
            }
            prop_assert_eq!(h.total(), values.len());
        }

        #[test]
        fn top_roles_never_exceed_limit(
            pays in prop::collection::vec((0usize..25, 0.0..1_000_000.0f64), 1..100),
        ) {
            let records: Vec<SalaryRecord> = pays
                .iter()
                .map(|&(r, pay)| record(2023, "Senior", "Large", &format!("R{r}"), pay, "USA"))
                .collect();
            let top = top_roles_by_mean(&refs(&records), TOP_ROLES);
            prop_assert!(top.len() <= TOP_ROLES);
            prop_assert!(top.windows(2).all(|w| w[0].mean_salary >= w[1].mean_salary));
        }
    }
}
