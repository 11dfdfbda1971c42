mod end_to_end;
mod legacy_flags;
