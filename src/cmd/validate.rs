use super::{require_class, Store};
use crate::reports;
use clap::Args;
use seatforge::error::SfResult;
use seatforge::model::ClassId;
use seatforge::validator;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    pub class: ClassId,
}

/// Prints the report; `Ok(false)` when the class has problems.
pub fn run(args: ValidateArgs, store: &Store) -> SfResult<bool> {
    let class = require_class(store, args.class)?;
    let errors = validator::validate(class);
    reports::print_validation_report(class, &errors);
    Ok(errors.is_empty())
}
