//! Route state for page navigation.
//!
//! Only `Login` and `UserList` are rendered by this workspace; the other routes are
//! navigation targets owned by screens outside it.

use serde::{Deserialize, Serialize};

use crate::users::UserId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    #[default]
    Login,
    UserList,
    VerifyOtp,
    SelectCompany,
    EditUser(UserId),
    AddUser,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_owned(),
            Self::UserList => "/userList".to_owned(),
            Self::VerifyOtp => "/verify-otp".to_owned(),
            Self::SelectCompany => "/select-company".to_owned(),
            Self::EditUser(id) => format!("/user/edit/{id}"),
            Self::AddUser => "/user/add".to_owned(),
        }
    }
}
