use herbal_core::auth::User;

/// Why an admin-only operation was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("sign in required")]
    NotSignedIn,
    #[error("admin role required")]
    NotAdmin,
}

/// Checks that the signed-in user, if any, is an admin.
///
/// Returns the admin user, or the reason access is refused.
pub fn require_admin(current: Option<&User>) -> Result<&User, AccessDenied> {
    let user = current.ok_or(AccessDenied::NotSignedIn)?;
    if user.is_admin() {
        Ok(user)
    } else {
        Err(AccessDenied::NotAdmin)
    }
}
