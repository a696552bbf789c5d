use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::filtering::pagination::offset;
use crate::filtering::sort::OrderBy;

/// Data source a [`Navigator`](crate::Navigator) fetches pages from.
#[async_trait]
pub trait Collection: Send + Sync {
    type Item: Send;

    /// One page of items matching `condition`. Without a page size all
    /// matching items are returned.
    async fn find(
        &self,
        condition: Condition,
        order: Option<&OrderBy>,
        page_size: Option<u64>,
        page: u64,
    ) -> Result<Vec<Self::Item>, DbErr>;

    /// Number of items matching `condition`.
    async fn count(&self, condition: Condition) -> Result<u64, DbErr>;
}

/// A sea-orm entity table.
pub struct EntityCollection<E> {
    db: DatabaseConnection,
    entity: PhantomData<fn() -> E>,
}

impl<E> EntityCollection<E> {
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            entity: PhantomData,
        }
    }

    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl<E> Clone for EntityCollection<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

#[async_trait]
impl<E> Collection for EntityCollection<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    type Item = E::Model;

    async fn find(
        &self,
        condition: Condition,
        order: Option<&OrderBy>,
        page_size: Option<u64>,
        page: u64,
    ) -> Result<Vec<Self::Item>, DbErr> {
        let mut query = E::find().filter(condition);

        if let Some(order) = order {
            let (expr, direction) = order.order_expr();
            query = query.order_by(expr, direction);
        }

        if let Some(size) = page_size {
            query = query.offset(offset(page, size)).limit(size);
        }

        query.all(&self.db).await
    }

    async fn count(&self, condition: Condition) -> Result<u64, DbErr> {
        PaginatorTrait::count(E::find().filter(condition), &self.db).await
    }
}

/// Placeholder for a navigator without a data source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollection;

#[async_trait]
impl Collection for NoCollection {
    type Item = ();

    async fn find(
        &self,
        _condition: Condition,
        _order: Option<&OrderBy>,
        _page_size: Option<u64>,
        _page: u64,
    ) -> Result<Vec<Self::Item>, DbErr> {
        Ok(Vec::new())
    }

    async fn count(&self, _condition: Condition) -> Result<u64, DbErr> {
        Ok(0)
    }
}
