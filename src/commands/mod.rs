pub mod anggota;
pub mod auth;
pub mod dashboard;
pub mod inventaris;
pub mod iuran;
pub mod keuangan;
pub mod laporan;
pub mod pengumuman;
pub mod pengurus;
pub mod warga;
