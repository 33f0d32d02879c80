//! Typed operations against the Space Explorer schema.

use explorer_types::{LaunchPage, LaunchSummary};
use graphql_client::GraphQLQuery;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/schema.graphql",
    query_path = "graphql/get_launches.graphql",
    response_derives = "Debug, Clone, PartialEq"
)]
pub struct GetLaunches;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/schema.graphql",
    query_path = "graphql/login.graphql",
    response_derives = "Debug, Clone, PartialEq"
)]
pub struct Login;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/schema.graphql",
    query_path = "graphql/book_trips.graphql",
    response_derives = "Debug, Clone, PartialEq"
)]
pub struct BookTrips;

/// Flattens a `launches` response, dropping null entries.
pub fn launch_page(data: get_launches::ResponseData) -> LaunchPage {
    let connection = data.launches;
    let launches = connection
        .launches
        .into_iter()
        .flatten()
        .map(|launch| {
            let (missionName, missionPatch) = launch
                .mission
                .map(|m| (m.name, m.mission_patch))
                .unwrap_or((None, None));
            LaunchSummary {
                id: launch.id,
                site: launch.site,
                mission_name: missionName,
                mission_patch: missionPatch,
                rocket_name: launch.rocket.and_then(|r| r.name),
                is_booked: launch.is_booked,
            }
        })
        .collect();

    LaunchPage {
        cursor: connection.cursor,
        has_more: connection.has_more,
        launches,
    }
}
