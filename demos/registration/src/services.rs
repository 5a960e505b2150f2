#![allow(dead_code)]

use autoreg::{scoped, singleton, transient};

use crate::contracts::{IClock, IUserService};

#[scoped]
pub struct UserService;

impl IUserService for UserService {
    fn find(&self, id: u64) -> Option<String> {
        (id == 1).then(|| "admin".to_owned())
    }
}

impl Drop for UserService {
    fn drop(&mut self) {
        println!("User service dropped");
    }
}

// Implements no contract, so it's registered under itself
#[singleton]
pub struct Logger;

// Not tagged, never registered
pub struct Helper;

impl IUserService for Helper {
    fn find(&self, _id: u64) -> Option<String> {
        None
    }
}

// A type may carry several lifetimes, each one becomes a separate registration
#[singleton]
#[transient]
#[derive(Debug, Default)]
pub struct SystemClock;

impl Drop for SystemClock {
    fn drop(&mut self) {}
}

impl IClock for SystemClock {
    fn now(&self) -> u64 {
        0
    }
}
