//! Uniform fetch/persist contract over sea-orm.
//!
//! Every repository goes through [`Gateway`] so that presence checks
//! (`NotFound` / `AlreadyExists`) and response projection are expressed once.
//! The gateway borrows the caller's connection for the duration of a call
//! and never keeps a handle of its own.

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, Select,
    TransactionTrait,
};

use crate::error::GatewayError;

/// An entity that can be fetched through the gateway.
///
/// `NAME` is the human-readable record name used in `NotFound` and
/// `AlreadyExists` messages (e.g. `"Course"`).
pub trait Record: EntityTrait {
    const NAME: &'static str;
}

pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;
pub type ModelOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

/// What to fetch. Each arm carries exactly the arguments it needs.
pub enum Fetch<E: EntityTrait> {
    /// Single record by primary key.
    ById(PrimaryKeyOf<E>),
    /// First match of a query.
    QueryOne(Select<E>),
    /// Every match of a query, in store order.
    QueryAll(Select<E>),
    /// Every record of the type.
    All,
}

/// A [`Fetch`] plus optional presence checks.
pub struct FetchRequest<E: EntityTrait> {
    fetch: Fetch<E>,
    require_found: bool,
    require_absent: bool,
}

impl<E: EntityTrait> FetchRequest<E> {
    pub fn new(fetch: Fetch<E>) -> Self {
        Self {
            fetch,
            require_found: false,
            require_absent: false,
        }
    }

    pub fn by_id<K>(id: K) -> Self
    where
        K: Into<PrimaryKeyOf<E>>,
    {
        Self::new(Fetch::ById(id.into()))
    }

    pub fn query_one(select: Select<E>) -> Self {
        Self::new(Fetch::QueryOne(select))
    }

    pub fn query_all(select: Select<E>) -> Self {
        Self::new(Fetch::QueryAll(select))
    }

    pub fn all() -> Self {
        Self::new(Fetch::All)
    }

    /// Fail with `NotFound` when the result is empty.
    pub fn require_found(mut self) -> Self {
        self.require_found = true;
        self
    }

    /// Fail with `AlreadyExists` when the result is non-empty.
    pub fn require_absent(mut self) -> Self {
        self.require_absent = true;
        self
    }
}

impl<E: EntityTrait> From<Fetch<E>> for FetchRequest<E> {
    fn from(fetch: Fetch<E>) -> Self {
        Self::new(fetch)
    }
}

/// Result of a fetch: single-record modes yield `One`, list modes `Many`.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    One(Option<T>),
    Many(Vec<T>),
}

impl<T> Fetched<T> {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(one) => one.is_none(),
            Self::Many(many) => many.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(one) => usize::from(one.is_some()),
            Self::Many(many) => many.len(),
        }
    }

    /// Apply `f` to every fetched value, keeping the shape.
    pub fn map<U, F>(self, mut f: F) -> Fetched<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Self::One(one) => Fetched::One(one.map(f)),
            Self::Many(many) => Fetched::Many(many.into_iter().map(&mut f).collect()),
        }
    }

    /// The single value, or the first of a list.
    pub fn into_one(self) -> Option<T> {
        match self {
            Self::One(one) => one,
            Self::Many(many) => many.into_iter().next(),
        }
    }

    pub fn into_many(self) -> Vec<T> {
        match self {
            Self::One(one) => one.into_iter().collect(),
            Self::Many(many) => many,
        }
    }
}

/// Data-access gateway bound to one storage handle for the current request.
#[derive(Clone, Copy)]
pub struct Gateway<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Gateway<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetch raw records.
    pub async fn fetch<E>(&self, request: FetchRequest<E>) -> Result<Fetched<E::Model>, GatewayError>
    where
        E: Record,
    {
        self.fetch_projected(request, std::convert::identity).await
    }

    /// Fetch records and map each one through `projection`.
    pub async fn fetch_projected<E, T, F>(
        &self,
        request: FetchRequest<E>,
        projection: F,
    ) -> Result<Fetched<T>, GatewayError>
    where
        E: Record,
        F: FnMut(E::Model) -> T + Send,
    {
        let FetchRequest {
            fetch,
            require_found,
            require_absent,
        } = request;
        if require_found && require_absent {
            return Err(GatewayError::InvalidUsage(
                "require_found and require_absent are mutually exclusive",
            ));
        }

        let fetched = match fetch {
            Fetch::ById(id) => Fetched::One(E::find_by_id(id).one(self.db).await?),
            Fetch::QueryOne(select) => Fetched::One(select.one(self.db).await?),
            Fetch::QueryAll(select) => Fetched::Many(select.all(self.db).await?),
            Fetch::All => Fetched::Many(E::find().all(self.db).await?),
        };

        if require_found && fetched.is_empty() {
            return Err(GatewayError::NotFound(E::NAME));
        }
        if require_absent && !fetched.is_empty() {
            return Err(GatewayError::AlreadyExists(E::NAME));
        }
        Ok(fetched.map(projection))
    }

    /// Number of records matching `select`.
    pub async fn count<E>(&self, select: Select<E>) -> Result<u64, GatewayError>
    where
        E: Record,
        E::Model: Sync,
    {
        Ok(select.count(self.db).await?)
    }

    /// Add or update `record` and return the stored state.
    pub async fn persist<A>(&self, record: A) -> Result<ModelOf<A>, GatewayError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        ModelOf<A>: IntoActiveModel<A>,
    {
        self.persist_projected(record, std::convert::identity).await
    }

    /// Add or update `record` and return its projection.
    ///
    /// A record whose primary key was loaded from the store (all key columns
    /// `Unchanged`) is updated; anything else is inserted, with unset keys
    /// generated by the entity's `before_save`. One transaction per call.
    pub async fn persist_projected<A, T, F>(&self, record: A, projection: F) -> Result<T, GatewayError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        ModelOf<A>: IntoActiveModel<A>,
        F: FnOnce(ModelOf<A>) -> T + Send,
    {
        let stored = loaded_from_store(&record);
        let txn = self.db.begin().await?;
        let model = if stored {
            record.update(&txn).await?
        } else {
            record.insert(&txn).await?
        };
        txn.commit().await?;
        Ok(projection(model))
    }
}

fn loaded_from_store<A>(record: &A) -> bool
where
    A: ActiveModelTrait,
{
    <<A::Entity as EntityTrait>::PrimaryKey as Iterable>::iter()
        .all(|key| matches!(record.get(key.into_column()), ActiveValue::Unchanged(_)))
}
