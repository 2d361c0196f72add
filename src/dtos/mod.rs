pub mod exchangedtos;
pub mod messagedtos;
pub mod userdtos;
pub mod userskilldtos;
