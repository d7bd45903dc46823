use crate::models::{Role, User};

/// The acting user for a call, if anyone is logged in.
///
/// Passed explicitly into every policy check and repository mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn clear(&mut self) {
        self.user = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_no_user() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert_eq!(session.user_id(), None);
        assert_eq!(session.role(), None);
    }

    #[test]
    fn clear_drops_the_user() {
        let mut session = Session::for_user(User::new("u2", "Manager Naval", Role::Manager));
        assert_eq!(session.user_id(), Some("u2"));
        assert_eq!(session.role(), Some(Role::Manager));

        session.clear();
        assert!(!session.is_authenticated());
    }
}
