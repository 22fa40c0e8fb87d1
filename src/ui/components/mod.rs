pub mod api_demo;
pub mod message_card;
pub mod motd_view;
