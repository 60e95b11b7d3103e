use crate::api::{AuthApi, CatalogReader, PlaceReader};
use crate::domain::filter::FilterCriteria;
use crate::domain::place::Place;
use crate::domain::types::PlaceId;
use crate::dto::catalog::{FilterOptionDto, FilterOptionsDto};
use crate::session::{Session, SessionExecutor};

use super::{ServiceResult, failed};

/// Lists the catalog. An empty filter is the same as no filter.
pub async fn list_places<A>(
    filter: Option<FilterCriteria>,
    session: &Session,
    api: &A,
) -> ServiceResult<Vec<Place>>
where
    A: AuthApi + PlaceReader + ?Sized,
{
    let filter = filter.filter(|f| !f.is_empty());
    let filter = filter.as_ref();
    SessionExecutor::new(session, api)
        .run(|token| async move { api.list_places(&token, filter).await })
        .await
        .map_err(|e| failed("list places", e))
}

pub async fn get_place<A>(id: &PlaceId, session: &Session, api: &A) -> ServiceResult<Place>
where
    A: AuthApi + PlaceReader + ?Sized,
{
    SessionExecutor::new(session, api)
        .run(|token| async move { api.get_place(&token, id).await })
        .await
        .map_err(|e| failed(&format!("get place {id}"), e))
}

/// Category and district options, marked according to `selected`.
///
/// Both dictionaries are requested concurrently within one executor run, so
/// an expired token is refreshed once for the pair.
pub async fn filter_options<A>(
    selected: &FilterCriteria,
    session: &Session,
    api: &A,
) -> ServiceResult<FilterOptionsDto>
where
    A: AuthApi + CatalogReader + ?Sized,
{
    let (categories, districts) = SessionExecutor::new(session, api)
        .run(|token| async move {
            tokio::try_join!(api.list_categories(&token), api.list_districts(&token))
        })
        .await
        .map_err(|e| failed("load filter options", e))?;

    Ok(FilterOptionsDto {
        categories: categories
            .iter()
            .map(|c| FilterOptionDto::category(c, selected.category_ids.contains(&c.id)))
            .collect(),
        districts: districts
            .iter()
            .map(|d| FilterOptionDto::district(d, selected.district_ids.contains(&d.id)))
            .collect(),
    })
}
