use crate::db::schema::t_registration;
use diesel::prelude::*;

#[derive(Debug, Queryable)]
#[diesel(table_name = t_registration)]
pub struct RegistrationRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub contact_number: String,
    pub address: String,
    pub company: String,
    pub designation: String,
    pub first_time: bool,
    /// JSON array of event slot names.
    pub selected_events: String,
    pub submitted_at: i64,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = t_registration)]
pub struct NewRegistrationRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub contact_number: String,
    pub address: String,
    pub company: String,
    pub designation: String,
    pub first_time: bool,
    pub selected_events: String,
    pub submitted_at: i64,
}
