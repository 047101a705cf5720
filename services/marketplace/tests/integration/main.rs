mod account_test;
mod auth_test;
mod favorite_test;
mod helpers;
mod property_test;
mod rating_test;
