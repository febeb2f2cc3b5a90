// handlers/protected/mod.rs - Dashboard handlers (session required)
//
// Route Prefix: /dashboard/*
// The route guard has already verified that the session cookie decrypts.
// Calls to the admin API carry the session token through RequestSession.

pub mod dashboard;
pub mod products;
