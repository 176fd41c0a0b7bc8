// # Routes Module
//
// - HTTP route handlers for the demo server, organized by functionality.
//
//  ## Available Route Modules
// - `health`: Health check endpoint
// - `auth`: Login and token-protected endpoints

/// Health check and monitoring endpoints
pub mod health;

/// Login and protected user endpoints
pub mod auth;
