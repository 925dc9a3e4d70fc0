use crate::arg::args::{
    Arg, CategoryArg, DateArg, EdgeArg, IntArg, NameArg, NumberArg, PriorityArg, StatusArg,
    TagArg, TimeArg,
};
use crate::command::block_spec::core::{ArgPattern, ArgSlot};
use crate::core::models::{BlockId, MAX_BLOCK_MINUTES, MIN_BLOCK_MINUTES};
use crate::errors::Error;

// Slots

pub fn block_id_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<IntArg>().with_validator_ctx(|arg, ctx| match arg {
        Arg::Int(id) if *id <= 0 => Err(Error::Parse("ID must be greater than 0.".into())),
        Arg::Int(id) => {
            let exists = u32::try_from(*id)
                .map(|id| ctx.store.get(BlockId(id)).is_some())
                .unwrap_or(false);
            if exists {
                Ok(())
            } else {
                Err(Error::Parse(format!("Block with id {} does not exist.", id)))
            }
        }
        _ => Ok(()),
    })
}

pub fn title_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<NameArg>()
}

pub fn minutes_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<IntArg>().with_validator(|arg| match arg {
        Arg::Int(m) if *m < MIN_BLOCK_MINUTES => Err(Error::Parse(format!(
            "Duration must be at least {MIN_BLOCK_MINUTES} minutes"
        ))),
        Arg::Int(m) if *m > MAX_BLOCK_MINUTES => Err(Error::Parse(format!(
            "Duration must be at most {MAX_BLOCK_MINUTES} minutes"
        ))),
        _ => Ok(()),
    })
}

pub fn hour_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<IntArg>()
}

pub fn pixels_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<NumberArg>()
}

pub fn edge_slot() -> ArgSlot {
    ArgSlot::is_of_arg_type::<EdgeArg>()
}

/// Block fields in the order `add` and `mod` accept them.
pub fn field_slots(time_required: bool) -> ArgPattern {
    let time = ArgSlot::is_of_arg_type::<TimeArg>();
    vec![
        if time_required { time } else { time.optional() },
        minutes_slot().optional(),
        ArgSlot::is_of_arg_type::<DateArg>().optional(),
        ArgSlot::is_of_arg_type::<NameArg>().optional(),
        ArgSlot::is_of_arg_type::<StatusArg>().optional(),
        ArgSlot::is_of_arg_type::<PriorityArg>().optional(),
        ArgSlot::is_of_arg_type::<CategoryArg>().optional(),
        ArgSlot::is_of_arg_type::<TagArg>().optional().repeated(),
    ]
}

/// Target hour as a grid row; negative hours are off the grid.
pub fn grid_hour(hour: i64) -> Option<u32> {
    u32::try_from(hour).ok()
}
