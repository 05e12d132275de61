//! Entity module - SeaORM definitions for the records held by the SPBU ledger.
//! Every model stores fields in their wire encoding (fixed-point integers,
//! minute offsets, Unix seconds, small-integer enums); decoding happens in the
//! view pipeline, never here.

pub mod asset;
pub mod jam_kerja;
pub mod member;
pub mod penerimaan;
pub mod produk;
pub mod rencana_pembelian;
pub mod role_grant;
pub mod spbu;
pub mod status_member;

// Re-export specific types to avoid conflicts
pub use asset::{Column as AssetColumn, Entity as Asset, Model as AssetModel};
pub use jam_kerja::{Column as JamKerjaColumn, Entity as JamKerja, Model as JamKerjaModel};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use penerimaan::{Column as PenerimaanColumn, Entity as Penerimaan, Model as PenerimaanModel};
pub use produk::{Column as ProdukColumn, Entity as Produk, Model as ProdukModel};
pub use rencana_pembelian::{
    Column as RencanaPembelianColumn, Entity as RencanaPembelian, Model as RencanaPembelianModel,
};
pub use role_grant::{Column as RoleGrantColumn, Entity as RoleGrant, Model as RoleGrantModel};
pub use spbu::{Column as SpbuColumn, Entity as Spbu, Model as SpbuModel};
pub use status_member::{
    Column as StatusMemberColumn, Entity as StatusMember, Model as StatusMemberModel,
};
