// handlers/public/mod.rs - Public handlers (no session required)
//
// Route Prefix: /auth/*
// Visitors that already hold a valid session are redirected to the
// dashboard by the route guard before reaching these handlers.

pub mod auth;
