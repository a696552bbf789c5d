use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
};
use crudnav::{
    EntityCollection, Navigator, NavigatorError, NavigatorRequest, PageSummary, Validator,
};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema, Set};
use serde::{Deserialize, Serialize};

pub mod page_entity;

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;

    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(page_entity::Entity)))
        .await?;

    Ok(db)
}

/// Insert pages with ids `1..=count`, named `Item #<id>`.
pub async fn fill_pages(db: &DatabaseConnection, count: i32) -> Result<(), DbErr> {
    let pages = (1..=count).map(|id| page_entity::ActiveModel {
        id: Set(id),
        name: Set(format!("Item #{id}")),
    });
    page_entity::Entity::insert_many(pages).exec(db).await?;
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PageList {
    pub items: Vec<page_entity::Model>,
    pub summary: PageSummary,
}

async fn list_pages(
    State(db): State<DatabaseConnection>,
    req: NavigatorRequest,
) -> Result<(HeaderMap, Json<PageList>), NavigatorError> {
    let mut nav = Navigator::from_request(req).bind(EntityCollection::<page_entity::Entity>::new(db));
    nav.add_filter_between("id").set_validator(Validator::numeric());
    nav.add_filter_like("name");
    nav.add_order_by("id");
    nav.add_order_by("name");
    nav.set_default_order_by("id", true);
    nav.set_page_size(Some(5));

    nav.fetch_total().await?;
    let items = nav.items().await?;

    Ok((
        nav.content_range("pages"),
        Json(PageList {
            items,
            summary: nav.page_summary(),
        }),
    ))
}

/// The predicates a request resolves to, as SQL text.
async fn conditions(req: NavigatorRequest) -> String {
    let mut nav = Navigator::from_request(req);
    nav.add_filter_equal("name");
    nav.add_filter_between("id").set_validator(Validator::numeric());
    nav.process_filters().as_sql()
}

async fn misconfigured(req: NavigatorRequest) -> Result<Json<PageSummary>, NavigatorError> {
    let nav = Navigator::from_request(req);
    nav.filter("missing")?;
    Ok(Json(nav.page_summary()))
}

pub fn setup_test_app(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/pages", get(list_pages).post(list_pages))
        .route("/conditions", post(conditions))
        .route("/pages/{*params}", get(list_pages))
        .route("/broken", get(misconfigured))
        .with_state(db)
}
