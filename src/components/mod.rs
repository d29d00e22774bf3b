mod dashboard;
mod login;
mod navigation;
mod signup;

pub use dashboard::DashboardScreen;
pub use login::LoginScreen;
pub use navigation::AuthTabs;
pub use signup::SignupScreen;
