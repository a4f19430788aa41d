//! Vendor adapter implementations.

pub(crate) mod common;

pub mod aliyun;
pub mod cloudflare;
pub mod dnspod;
pub mod unimplemented;

pub use aliyun::AliyunProvider;
pub use cloudflare::CloudflareProvider;
pub use dnspod::DnspodProvider;
pub use unimplemented::UnimplementedProvider;
