//! Form layouts and the client-side checks run before anything is submitted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use globetrotter::{
    domain::{
        validate_trip_fields, BudgetCategory, NewBudgetEntry, NewTrip, Trip, TripUpdate,
        UserUpdate,
    },
    Credentials, NewUser,
};

use super::{Form, FormField};

pub const MIN_PASSWORD_LEN: usize = 6;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub mod login {
    pub const EMAIL: usize = 0;
    pub const PASSWORD: usize = 1;
}

pub mod register {
    pub const NAME: usize = 0;
    pub const EMAIL: usize = 1;
    pub const PASSWORD: usize = 2;
    pub const CONFIRM: usize = 3;
}

pub mod trip {
    pub const NAME: usize = 0;
    pub const DESCRIPTION: usize = 1;
    pub const START: usize = 2;
    pub const END: usize = 3;
}

pub mod budget {
    pub const AMOUNT: usize = 0;
    pub const DESCRIPTION: usize = 1;
}

pub mod profile {
    pub const NAME: usize = 0;
    pub const EMAIL: usize = 1;
}

pub fn login_form() -> Form {
    Form::new(vec![
        FormField::text("Email").hint("you@example.com"),
        FormField::secret("Password"),
    ])
}

pub fn register_form() -> Form {
    Form::new(vec![
        FormField::text("Full name"),
        FormField::text("Email").hint("you@example.com"),
        FormField::secret("Password").hint("at least 6 characters"),
        FormField::secret("Confirm password"),
    ])
}

pub fn trip_form() -> Form {
    Form::new(vec![
        FormField::text("Trip name").hint("Summer in Portugal"),
        FormField::text("Description"),
        FormField::text("Start date").hint("YYYY-MM-DD"),
        FormField::text("End date").hint("YYYY-MM-DD"),
    ])
}

pub fn budget_form() -> Form {
    Form::new(vec![
        FormField::text("Amount").hint("0.00"),
        FormField::text("Description"),
    ])
}

pub fn profile_form() -> Form {
    Form::new(vec![
        FormField::text("Full name"),
        FormField::text("Email").hint("you@example.com"),
    ])
}

/// Trip form pre-filled for editing.
pub fn trip_form_for(trip: &Trip) -> Form {
    let mut form = trip_form();
    form.set_value(trip::NAME, &trip.name);
    form.set_value(trip::DESCRIPTION, trip.description.as_deref().unwrap_or(""));
    form.set_value(trip::START, &trip.start_day().format(DATE_FORMAT).to_string());
    form.set_value(trip::END, &trip.end_day().format(DATE_FORMAT).to_string());
    form
}

fn required<'a>(form: &'a Form, index: usize, message: &str) -> Result<&'a str, String> {
    let value = form.value(index).trim();
    if value.is_empty() {
        Err(message.to_string())
    } else {
        Ok(value)
    }
}

fn optional(form: &Form, index: usize) -> Option<String> {
    let value = form.value(index).trim();
    (!value.is_empty()).then(|| value.to_string())
}

pub fn login_credentials(form: &Form) -> Result<Credentials, String> {
    let email = required(form, login::EMAIL, "Email is required")?;
    let password = form.value(login::PASSWORD);
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    Ok(Credentials::new(email, password))
}

pub fn register_payload(form: &Form) -> Result<NewUser, String> {
    let name = required(form, register::NAME, "Name is required")?;
    let email = required(form, register::EMAIL, "Email is required")?;
    let password = form.value(register::PASSWORD);
    if password != form.value(register::CONFIRM) {
        return Err("Passwords do not match".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn parse_day(form: &Form, index: usize, label: &str) -> Result<NaiveDateTime, String> {
    let raw = required(form, index, &format!("{} is required", label))?;
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| format!("{} must be a date like 2024-06-01", label))
}

pub fn trip_payload(form: &Form) -> Result<NewTrip, String> {
    let name = required(form, trip::NAME, "Trip name is required")?;
    let start_date = parse_day(form, trip::START, "Start date")?;
    let end_date = parse_day(form, trip::END, "End date")?;
    validate_trip_fields(name, start_date, end_date).map_err(|e| e.to_string())?;
    Ok(NewTrip {
        name: name.to_string(),
        description: optional(form, trip::DESCRIPTION),
        start_date,
        end_date,
        cover_photo: None,
    })
}

pub fn trip_update_payload(form: &Form) -> Result<TripUpdate, String> {
    let trip = trip_payload(form)?;
    Ok(TripUpdate {
        name: Some(trip.name),
        description: Some(trip.description.unwrap_or_default()),
        start_date: Some(trip.start_date),
        end_date: Some(trip.end_date),
        ..TripUpdate::default()
    })
}

pub fn budget_payload(form: &Form, category: BudgetCategory) -> Result<NewBudgetEntry, String> {
    let raw = required(form, budget::AMOUNT, "Amount is required")?;
    let amount: f64 = raw
        .parse()
        .map_err(|_| "Amount must be a number".to_string())?;
    if !amount.is_finite() || amount < 0.0 {
        return Err("Amount must be zero or more".to_string());
    }
    Ok(NewBudgetEntry {
        category,
        amount,
        description: optional(form, budget::DESCRIPTION),
    })
}

/// A profile edit. `PUT /users/me` only takes the name, so the email is
/// applied to the cached session alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileEdit {
    pub update: UserUpdate,
    pub email: String,
}

pub fn profile_payload(form: &Form) -> Result<ProfileEdit, String> {
    let name = required(form, profile::NAME, "Name is required")?;
    let email = required(form, profile::EMAIL, "Email is required")?;
    if !email.contains('@') {
        return Err("Enter a valid email address".to_string());
    }
    Ok(ProfileEdit {
        update: UserUpdate {
            full_name: Some(name.to_string()),
            profile_photo: None,
        },
        email: email.to_string(),
    })
}
