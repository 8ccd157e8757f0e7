//! Session CLI commands

use crate::error::ExpenseResult;
use crate::services::{ExpenseService, SessionService};
use crate::storage::Storage;

pub fn handle_login_command(storage: &Storage, email: &str, password: &str) -> ExpenseResult<()> {
    let user = SessionService::new(storage).login(email, password)?;
    println!("Logged in as {}", user);
    Ok(())
}

pub fn handle_register_command(
    storage: &Storage,
    email: &str,
    password: &str,
    name: &str,
) -> ExpenseResult<()> {
    let user = SessionService::new(storage).register(email, password, name)?;
    println!("Registered and logged in as {}", user);
    Ok(())
}

pub fn handle_logout_command(storage: &Storage) -> ExpenseResult<()> {
    match SessionService::new(storage).logout()? {
        Some(user) => println!("Logged out {}", user.email),
        None => println!("Not logged in."),
    }
    Ok(())
}

pub fn handle_whoami_command(storage: &Storage) -> ExpenseResult<()> {
    match SessionService::new(storage).current_user()? {
        Some(user) => {
            let expenses = ExpenseService::new(storage).count(user.id)?;
            println!("{}", user);
            println!("User ID:  {}", user.id);
            println!("Expenses: {}", expenses);
        }
        None => println!("Not logged in."),
    }
    Ok(())
}
