pub mod coordinator;
pub mod debounce;
pub mod recent;
pub mod suggest;
