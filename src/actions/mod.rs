//! Credential-facing flows composed from the repositories and the
//! session manager. Page handlers call these; they never touch the
//! stores directly.

mod change_password;
mod sign_in;
mod sign_out;

pub use change_password::ChangePasswordAction;
pub use sign_in::SignInAction;
pub use sign_out::SignOutAction;
