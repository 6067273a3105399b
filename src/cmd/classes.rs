use super::{require_class, Store};
use crate::reports;
use clap::{ArgMatches, Args, Subcommand, ValueEnum};
use seatforge::config::PriorityWeights;
use seatforge::error::{SeatForgeError, SfResult};
use seatforge::model::{ClassConfig, ClassId, DeskType, Student};
use seatforge::protocol::resolve_named_pair;
use std::path::PathBuf;
use tracing::info;

#[derive(Subcommand, Debug, Clone)]
pub enum ClassCommand {
    /// Create an empty class
    Add { name: String },
    /// Show every class
    List,
    /// Remove a class and its seating history
    Delete { id: ClassId },
}

pub fn run_class(cmd: ClassCommand, store: &mut Store) -> SfResult<()> {
    match cmd {
        ClassCommand::Add { name } => {
            let id = store.add_class(&name)?;
            println!("added class {}", id);
        }
        ClassCommand::List => reports::print_class_list(store.classes()),
        ClassCommand::Delete { id } => {
            if !store.delete_class(id)? {
                return Err(SeatForgeError::Validation(format!(
                    "class {} not found",
                    id
                )));
            }
            println!("deleted class {}", id);
        }
    }
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct StudentArgs {
    pub class: ClassId,
    pub name: String,

    /// Preferred rows, 1-based, comma separated
    #[arg(long, default_value = "")]
    pub rows: String,
    /// Preferred desks, 1-based, comma separated
    #[arg(long, default_value = "")]
    pub desks: String,
    #[arg(long, default_value = "")]
    pub medical_rows: String,
    #[arg(long, default_value = "")]
    pub medical_desks: String,
}

pub fn run_student(args: StudentArgs, store: &mut Store) -> SfResult<()> {
    let id = store
        .modify_class(args.class, |class| {
            let id = class.next_student_id();
            class.students.push(Student {
                id,
                name: args.name.clone(),
                preferred_rows: args.rows,
                preferred_columns: args.desks,
                medical_preferred_row: args.medical_rows,
                medical_preferred_column: args.medical_desks,
            });
            id
        })?
        .ok_or_else(|| class_not_found(args.class))?;

    println!("added student {} ({})", id, args.name);
    Ok(())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    Prefer,
    Forbid,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PairCommand {
    /// Pair two students by name
    Add {
        class: ClassId,
        kind: PairKind,
        first: String,
        second: String,
    },
    /// Append a blank preference row
    Blank { class: ClassId },
}

pub fn run_pair(cmd: PairCommand, store: &mut Store) -> SfResult<()> {
    match cmd {
        PairCommand::Add {
            class,
            kind,
            first,
            second,
        } => {
            let pair = resolve_named_pair(require_class(store, class)?, &first, &second)
                .ok_or_else(|| {
                    SeatForgeError::Validation(format!(
                        "unknown student in pair '{}' / '{}'",
                        first, second
                    ))
                })?;

            store.modify_class(class, |c| match kind {
                PairKind::Prefer => c.preferences.push(pair),
                PairKind::Forbid => c.forbidden.push(pair),
            })?;
            println!("paired {} and {}", first, second);
        }
        PairCommand::Blank { class } => {
            if !store.add_preference(class)? {
                return Err(class_not_found(class));
            }
        }
    }
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    pub class: ClassId,
    #[arg(long)]
    pub rows: i64,
    #[arg(long)]
    pub columns: i64,
    #[arg(long, default_value_t = DeskType::Single)]
    pub desk_type: DeskType,
}

pub fn run_config(args: ConfigArgs, store: &mut Store) -> SfResult<()> {
    let config = ClassConfig::new(args.rows, args.columns, args.desk_type);
    store
        .modify_class(args.class, |c| c.class_config = Some(config))?
        .ok_or_else(|| class_not_found(args.class))?;
    info!(
        "Class {} grid set to {}x{} ({})",
        args.class, args.rows, args.columns, args.desk_type
    );
    Ok(())
}

#[derive(Args, Debug, Clone)]
pub struct PrioritiesArgs {
    pub class: ClassId,

    #[command(flatten)]
    pub weights: PriorityWeights,

    /// JSON file with a full set of weights
    #[arg(long = "from-file")]
    pub from_file: Option<PathBuf>,
}

/// Base is the file (if given) or the class's current weights; only the
/// flags typed on this invocation override it.
pub fn run_priorities(args: PrioritiesArgs, matches: &ArgMatches, store: &mut Store) -> SfResult<()> {
    let mut weights = match &args.from_file {
        Some(path) => PriorityWeights::load_from_file(path)?,
        None => require_class(store, args.class)?.priorities,
    };
    weights.merge_from_cli(&args.weights, matches);
    weights.check_range()?;

    store
        .modify_class(args.class, |c| c.priorities = weights)?
        .ok_or_else(|| class_not_found(args.class))?;
    println!(
        "priorities: medical {} friends {} enemies {} preferences {} fill {}",
        weights.medical, weights.friends, weights.enemies, weights.preferences, weights.fill
    );
    Ok(())
}

fn class_not_found(id: ClassId) -> SeatForgeError {
    SeatForgeError::Validation(format!("class {} not found", id))
}
