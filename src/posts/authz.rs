use crate::error::AppError;
use crate::posts::repo::Post;

/// Ownership gate for mutating routes. The existence check comes first:
/// a missing post is `NotFound` for every caller, owner or not.
pub fn authorize_owner(post: Option<Post>, caller: i64) -> Result<Post, AppError> {
    let post = post.ok_or(AppError::NotFound("post"))?;
    if post.user_id != caller {
        return Err(AppError::Forbidden);
    }
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post_owned_by(user_id: i64) -> Post {
        Post {
            id: 1,
            title: "first".into(),
            content: "hello".into(),
            date_posted: datetime!(2024-01-01 00:00:00 UTC),
            user_id,
        }
    }

    #[test]
    fn owner_passes() {
        let post = authorize_owner(Some(post_owned_by(5)), 5).expect("owner allowed");
        assert_eq!(post.id, 1);
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = authorize_owner(Some(post_owned_by(5)), 6).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn missing_post_is_not_found_even_for_wrong_caller() {
        // Not-found must win over forbidden regardless of who asks.
        let err = authorize_owner(None, 6).unwrap_err();
        assert!(matches!(err, AppError::NotFound("post")));
    }
}
