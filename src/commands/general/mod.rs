pub(crate) mod help;
pub(crate) mod move_member;
