pub mod gcd;
pub mod search_driver;

pub use gcd::{gcd, gcd_of};
pub use search_driver::{
    admissible_leftends, scan_partition, scan_total, scan_total_until, width_triples,
    OutcomeTally, PartitionScan, SearchDriver, SearchSummary, TotalScan,
};
