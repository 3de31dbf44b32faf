pub mod profile_rest_controller;
