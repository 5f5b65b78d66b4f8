pub mod domain;
pub mod library;
pub mod command;
pub mod controller;
pub mod repository;
pub mod registry;
pub mod events;
pub mod locks;
