use super::{require_class, Store};
use crate::reports;
use clap::Args;
use seatforge::error::SfResult;
use seatforge::model::ClassId;

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    pub class: ClassId,

    /// Also draw the most recent seating
    #[arg(long, default_value_t = false)]
    pub latest: bool,
}

pub fn run(args: HistoryArgs, store: &Store) -> SfResult<()> {
    let class = require_class(store, args.class)?;
    reports::print_history(class);

    if args.latest {
        if let Some(entry) = class.seatings.first() {
            reports::print_seating_grid(class, entry);
        }
    }
    Ok(())
}
