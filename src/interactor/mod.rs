pub mod balance_interactor;
pub mod catalog_interactor;
pub mod perp_interactor;
pub mod swap_interactor;
