use crate::entities::token::Claims;

/// Who may open a browser route, and where everyone else is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageGuard {
    Public,
    /// Signed-in viewers go to the blog instead.
    AnonymousOnly,
    SignedIn,
    /// Anonymous viewers go to `/auth`, signed-in non-admins to the fallback.
    AdminOr(&'static str),
    /// Anyone who is not an admin goes home.
    AdminOnly,
}

impl PageGuard {
    /// Returns the redirect target, or `None` when the viewer may stay.
    pub fn redirect_for(self, viewer: Option<&Claims>) -> Option<&'static str> {
        match (self, viewer) {
            (PageGuard::Public, _) => None,
            (PageGuard::AnonymousOnly, Some(_)) => Some("/blog"),
            (PageGuard::AnonymousOnly, None) => None,
            (PageGuard::SignedIn, None) => Some("/auth"),
            (PageGuard::SignedIn, Some(_)) => None,
            (PageGuard::AdminOr(_), None) => Some("/auth"),
            (PageGuard::AdminOr(fallback), Some(c)) if !c.admin => Some(fallback),
            (PageGuard::AdminOr(_), Some(_)) => None,
            (PageGuard::AdminOnly, Some(c)) if c.admin => None,
            (PageGuard::AdminOnly, _) => Some("/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(admin: bool) -> Claims {
        Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "viewer@example.com".into(),
            admin,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn admin_pages_send_everyone_else_home() {
        assert_eq!(PageGuard::AdminOnly.redirect_for(None), Some("/"));
        assert_eq!(PageGuard::AdminOnly.redirect_for(Some(&claims(false))), Some("/"));
        assert_eq!(PageGuard::AdminOnly.redirect_for(Some(&claims(true))), None);
    }

    #[test]
    fn editor_pages_distinguish_anonymous_from_non_admin() {
        let guard = PageGuard::AdminOr("/blog");
        assert_eq!(guard.redirect_for(None), Some("/auth"));
        assert_eq!(guard.redirect_for(Some(&claims(false))), Some("/blog"));
        assert_eq!(guard.redirect_for(Some(&claims(true))), None);
    }

    #[test]
    fn auth_page_is_for_anonymous_viewers() {
        assert_eq!(PageGuard::AnonymousOnly.redirect_for(Some(&claims(false))), Some("/blog"));
        assert_eq!(PageGuard::AnonymousOnly.redirect_for(None), None);
        assert_eq!(PageGuard::SignedIn.redirect_for(None), Some("/auth"));
    }
}
