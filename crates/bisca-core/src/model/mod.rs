pub mod card;
pub mod deal;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rules;
pub mod score;
pub mod suit;
pub mod trick;
pub mod value;
