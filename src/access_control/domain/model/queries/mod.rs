pub mod evaluate_authorization_query;
