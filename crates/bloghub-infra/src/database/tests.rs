#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbBackend, MockDatabase, MockExecResult, QueryTrait};
    use uuid::Uuid;

    use crate::database::entity::{comment, post, user};
    use crate::database::postgres_repo::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
        published_posts, search_published_posts,
    };
    use bloghub_core::domain::{Post, PostStatus};
    use bloghub_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

    fn post_model(title: &str, slug: &str) -> post::Model {
        let now = Utc::now();
        post::Model {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            category_id: None,
            title: title.to_owned(),
            slug: slug.to_owned(),
            excerpt: "excerpt".to_owned(),
            content: "content".to_owned(),
            status: post::PostStatus::Published,
            is_featured: false,
            allow_comments: true,
            views_count: 3,
            created_at: now.into(),
            updated_at: now.into(),
            published_at: Some(now.into()),
        }
    }

    #[tokio::test]
    async fn find_published_post_by_slug() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![post_model("Hello World", "hello-world")]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_published_by_slug("hello-world").await.unwrap();

        let found = result.expect("post should be found");
        assert_eq!(found.slug, "hello-world");
        assert_eq!(found.status, PostStatus::Published);
    }

    #[tokio::test]
    async fn find_post_by_id_maps_to_domain() {
        let model = post_model("Mapped", "mapped");
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.id, post_id);
        assert_eq!(post.title, "Mapped");
        assert_eq!(post.views_count, 3);
    }

    #[tokio::test]
    async fn increment_views_hits_exactly_one_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        repo.increment_views(Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn increment_views_on_missing_post_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.increment_views(Uuid::new_v4()).await;
        assert!(matches!(
            result.unwrap_err(),
            bloghub_core::error::RepoError::NotFound
        ));
    }

    #[tokio::test]
    async fn bulk_moderation_returns_mutated_count() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 5,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let ids: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();

        let updated = repo.set_approved(&ids, true).await.unwrap();
        assert_eq!(updated, 5);
    }

    #[tokio::test]
    async fn bulk_moderation_with_no_ids_touches_nothing() {
        // No exec expectation registered: hitting the database would panic.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PostgresCommentRepository::new(db);

        let updated = repo.set_approved(&[], true).await.unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn find_user_by_email() {
        let now = Utc::now();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![user::Model {
                id: Uuid::new_v4(),
                username: "sarah".to_owned(),
                email: "sarah@example.com".to_owned(),
                password_hash: "hash".to_owned(),
                is_staff: false,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresUserRepository::new(db);

        let user = repo
            .find_by_email("sarah@example.com")
            .await
            .unwrap()
            .expect("user should be found");
        assert_eq!(user.username, "sarah");
    }

    #[tokio::test]
    async fn approved_comments_listing_maps_to_domain() {
        let now = Utc::now();
        let post_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![comment::Model {
                id: Uuid::new_v4(),
                post_id,
                author_id: Uuid::new_v4(),
                content: "Great read".to_owned(),
                is_approved: true,
                created_at: now.into(),
                updated_at: now.into(),
            }]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        let comments = repo.list_approved_for_post(post_id).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert!(comments[0].is_approved);
    }

    fn count_row(num_items: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        std::collections::BTreeMap::from([("num_items", sea_orm::Value::BigInt(Some(num_items)))])
    }

    #[tokio::test]
    async fn out_of_range_page_clamps_to_last_page() {
        // 25 published posts at 10 per page gives 3 pages; page 99 must
        // land on page 3 instead of failing or coming back empty.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(25)]])
            .append_query_results(vec![vec![
                post_model("Twenty-one", "twenty-one"),
                post_model("Twenty-two", "twenty-two"),
                post_model("Twenty-three", "twenty-three"),
                post_model("Twenty-four", "twenty-four"),
                post_model("Twenty-five", "twenty-five"),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo.list_published(99).await.unwrap();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 25);
        assert_eq!(page.items.len(), 5);
    }

    #[tokio::test]
    async fn page_zero_on_empty_listing_clamps_to_first_page() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(0)]])
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo.list_published(0).await.unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }

    // Query-shape tests: the search select must degrade to the plain
    // published listing on an empty query, and must compare
    // case-insensitively otherwise.

    #[test]
    fn empty_search_query_is_the_published_listing() {
        let listing = published_posts().build(DbBackend::Postgres).to_string();
        let search = search_published_posts("").build(DbBackend::Postgres).to_string();
        let blank = search_published_posts("   ")
            .build(DbBackend::Postgres)
            .to_string();

        assert_eq!(search, listing);
        assert_eq!(blank, listing);
    }

    #[test]
    fn search_query_lowercases_and_substring_matches() {
        let sql = search_published_posts("Rust")
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("LOWER"), "case-insensitive match: {sql}");
        assert!(sql.contains("%rust%"), "substring pattern: {sql}");
        assert!(sql.contains("LEFT JOIN"), "category name is searched: {sql}");
    }
}
