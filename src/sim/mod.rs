pub mod action;
pub mod event;
pub mod gen;
pub mod registry;
pub mod session;
