use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};
use log::debug;
use serde::Serialize;

use super::db::{
    self, DeleteAllBeers, DeleteBeer, GetBeers, GetBeersByName, GetBeersByNamePaged, PageRequest,
    Pool, SaveBeer,
};
use super::error::Error;
use super::models::{Beer, BeerType};

/// Fixed size of a page for the paginated brewer lookup.
const PAGE_SIZE: i64 = 5;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/beer")
            .service(
                web::resource("")
                    .route(web::get().to(list))
                    .route(web::delete().to(remove_all)),
            )
            .service(web::resource("/brewer/{brewer}").route(web::get().to(list_by_brewer)))
            .service(
                web::resource("/brewer/{brewer}/page/{pageNum}")
                    .route(web::get().to(list_by_brewer_page)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::post().to(add))
                    .route(web::delete().to(remove)),
            ),
    );
}

/// Wire shape of a beer record. Key order is part of the contract:
/// `name`, `id`, `abv`, `type`, `brewerId`.
#[derive(Debug, Serialize)]
pub struct BeerJson {
    name: String,
    id: i32,
    abv: f64,
    #[serde(rename = "type")]
    type_: BeerType,
    #[serde(rename = "brewerId")]
    brewer_id: i32,
}

impl From<Beer> for BeerJson {
    fn from(beer: Beer) -> BeerJson {
        BeerJson {
            name: beer.name,
            id: beer.id,
            abv: beer.abv,
            type_: beer.type_,
            brewer_id: beer.brewer_id,
        }
    }
}

fn to_wire(beers: Vec<Beer>) -> Vec<BeerJson> {
    beers.into_iter().map(BeerJson::from).collect()
}

/// Route handler for creating or replacing a beer record.
///
/// The id in the path overrides whatever id the body carries; posting to
/// an existing id replaces the record in full.
///
/// Returns 200 with an empty body on success. A validation failure also
/// returns 200, with a JSON array of violation messages as the body; the
/// two are distinguishable only by body shape. That anomaly is part of
/// the wire contract and is kept as-is.
async fn add(
    pool: web::Data<Pool>,
    id: web::Path<i32>,
    body: web::Json<Beer>,
) -> Result<HttpResponse, Error> {
    let mut beer = body.into_inner();
    beer.id = id.into_inner();

    match db::execute(&pool, SaveBeer { beer }).await {
        Ok(saved) => {
            debug!("saved {}", saved);
            Ok(HttpResponse::Ok().content_type(ContentType::json()).body(""))
        }
        Err(Error::Validation(messages)) => Ok(HttpResponse::Ok().json(messages)),
        Err(e) => Err(e),
    }
}

/// Route handler for deleting one beer by id. Idempotent; an absent id
/// still yields 204.
async fn remove(pool: web::Data<Pool>, id: web::Path<i32>) -> Result<HttpResponse, Error> {
    db::execute(&pool, DeleteBeer { id: id.into_inner() }).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route handler for deleting every beer record.
async fn remove_all(pool: web::Data<Pool>) -> Result<HttpResponse, Error> {
    db::execute(&pool, DeleteAllBeers).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Route handler for listing every beer record.
async fn list(pool: web::Data<Pool>) -> Result<HttpResponse, Error> {
    let beers = db::execute(&pool, GetBeers).await?;
    Ok(HttpResponse::Ok().json(to_wire(beers)))
}

/// Route handler for the brewer lookup.
///
/// Despite the path segment, this filters on the beer's `name` field:
/// there is no Brewer entity, and the original service queried the name.
async fn list_by_brewer(
    pool: web::Data<Pool>,
    brewer: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let beers = db::execute(
        &pool,
        GetBeersByName {
            name: brewer.into_inner(),
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(to_wire(beers)))
}

/// Route handler for the paginated brewer lookup: pages of five, sorted
/// ascending by name then id, no pagination metadata in the body.
async fn list_by_brewer_page(
    pool: web::Data<Pool>,
    path: web::Path<(String, i64)>,
) -> Result<HttpResponse, Error> {
    let (brewer, page_num) = path.into_inner();
    let beers = db::execute(
        &pool,
        GetBeersByNamePaged {
            name: brewer,
            page: PageRequest::of(page_num, PAGE_SIZE),
        },
    )
    .await?;
    Ok(HttpResponse::Ok().json(to_wire(beers)))
}
