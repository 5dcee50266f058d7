pub mod duel_game;
