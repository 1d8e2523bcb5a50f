//! Profile Handlers

pub(crate) mod change_role;
pub(crate) mod check_password;
pub(crate) mod index;
pub(crate) mod me;
pub(crate) mod update_me;
