use actix_web::web;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use validator::Validate;

use super::error::{Error, Result};
use super::models::Beer;
use super::schema;

pub type Pool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type Connection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// A named data-access operation against the beer store.
///
/// Each operation is a plain struct carrying its arguments explicitly;
/// `execute` runs the synchronous diesel call on a pooled connection.
pub trait Query {
    type Item: Send;

    fn execute(&self, conn: &mut Connection) -> Result<Self::Item>;
}

/// Run a query on the blocking thread pool against a connection from `pool`.
pub async fn execute<Q>(pool: &Pool, query: Q) -> Result<Q::Item>
where
    Q: Query + Send + 'static,
    Q::Item: 'static,
{
    let pool = pool.clone();

    web::block(move || {
        let mut conn = pool.get()?;
        query.execute(&mut conn)
    })
    .await?
}

/// Explicit pagination arguments. Page numbers start at zero; a negative
/// page clamps to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn of(page: i64, size: i64) -> PageRequest {
        PageRequest {
            page: page.max(0),
            size,
        }
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

/*************************************/
/** Save (upsert) a beer            **/
/*************************************/

pub struct SaveBeer {
    pub beer: Beer,
}

impl Query for SaveBeer {
    type Item = Beer;

    fn execute(&self, conn: &mut Connection) -> Result<Beer> {
        use self::schema::beer::dsl::*;

        self.beer
            .validate()
            .map_err(|e| Error::Validation(violation_messages(&e)))?;

        Ok(diesel::insert_into(beer)
            .values(&self.beer)
            .on_conflict(id)
            .do_update()
            .set(&self.beer)
            .get_result(conn)?)
    }
}

fn violation_messages(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            messages.push(match &error.message {
                Some(m) => m.to_string(),
                None => format!("validation failed for field '{}'", field),
            });
        }
    }
    messages
}

/*************************************/
/** List every beer                 **/
/*************************************/

#[derive(Clone)]
pub struct GetBeers;

impl Query for GetBeers {
    type Item = Vec<Beer>;

    fn execute(&self, conn: &mut Connection) -> Result<Vec<Beer>> {
        use self::schema::beer::dsl::*;

        // Storage order; callers get whatever the engine returns.
        Ok(beer.load::<Beer>(conn)?)
    }
}

/*************************************/
/** Find a single beer by id        **/
/*************************************/

#[derive(Clone)]
pub struct GetBeer {
    pub id: i32,
}

impl Query for GetBeer {
    type Item = Option<Beer>;

    fn execute(&self, conn: &mut Connection) -> Result<Option<Beer>> {
        use self::schema::beer::dsl::*;

        Ok(beer.find(self.id).first::<Beer>(conn).optional()?)
    }
}

/*************************************/
/** Find beers by exact name        **/
/*************************************/

#[derive(Clone)]
pub struct GetBeersByName {
    pub name: String,
}

impl Query for GetBeersByName {
    type Item = Vec<Beer>;

    fn execute(&self, conn: &mut Connection) -> Result<Vec<Beer>> {
        use self::schema::beer::dsl::*;

        Ok(beer.filter(name.eq(&self.name)).load::<Beer>(conn)?)
    }
}

/*************************************/
/** Find beers by name, one page    **/
/*************************************/

#[derive(Clone)]
pub struct GetBeersByNamePaged {
    pub name: String,
    pub page: PageRequest,
}

impl Query for GetBeersByNamePaged {
    type Item = Vec<Beer>;

    fn execute(&self, conn: &mut Connection) -> Result<Vec<Beer>> {
        use self::schema::beer::dsl::*;

        Ok(beer
            .filter(name.eq(&self.name))
            .order((name.asc(), id.asc()))
            .limit(self.page.size)
            .offset(self.page.offset())
            .load::<Beer>(conn)?)
    }
}

/*************************************/
/** Delete one beer by id           **/
/*************************************/

#[derive(Clone)]
pub struct DeleteBeer {
    pub id: i32,
}

impl Query for DeleteBeer {
    type Item = ();

    fn execute(&self, conn: &mut Connection) -> Result<()> {
        use self::schema::beer::dsl::*;

        // Deleting an absent id is a no-op, not an error.
        diesel::delete(beer.find(self.id)).execute(conn)?;
        Ok(())
    }
}

/*************************************/
/** Delete every beer               **/
/*************************************/

#[derive(Clone)]
pub struct DeleteAllBeers;

impl Query for DeleteAllBeers {
    type Item = ();

    fn execute(&self, conn: &mut Connection) -> Result<()> {
        use self::schema::beer::dsl::*;

        diesel::delete(beer).execute(conn)?;
        Ok(())
    }
}
