/// Button press handling
pub mod callbacks;
/// Command, text and location handlers
pub mod handlers;
/// Sending rendered replies (HTML, long message splitting)
pub mod messaging;
/// Conversion of core layouts into Telegram keyboards
pub mod views;
