// Composition root for the ticket log.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the GraphQL client (in memory for now).
// - Expose the HTTP router and the GraphQL schema.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
