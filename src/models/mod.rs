pub mod exchangemodel;
pub mod messagemodel;
pub mod skillmodel;
pub mod usermodel;
pub mod userskillmodel;
