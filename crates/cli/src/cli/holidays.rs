//! Holiday catalog command.

use calprint_core::calendar::HolidayCategoryId;
use clap::Args;

/// Arguments for `calprint holidays`.
#[derive(Debug, Args)]
pub struct HolidaysArgs {
    /// Target year.
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=9999))]
    pub year: i32,

    /// Restrict to these categories. Repeatable. All categories when omitted.
    #[arg(long)]
    pub category: Vec<HolidayCategoryId>,
}
