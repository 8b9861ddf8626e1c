#[cfg(test)]
mod tests {
    use crate::models::{AnggotaKeluarga, Bulan, Iuran, IuranStatus, PemasukanLain, Pengeluaran, Role, Warga};

    fn warga(id: &str, nama: &str, blok: &str, nomor: &str) -> Warga {
        Warga {
            id: id.to_string(),
            nama: nama.to_string(),
            jenis_kelamin: "L".to_string(),
            blok: blok.to_string(),
            nomor_rumah: nomor.to_string(),
            status_tinggal: "Tetap".to_string(),
            ..Default::default()
        }
    }

    fn iuran(
        id: &str,
        warga_id: &str,
        bulan: Bulan,
        tahun: i32,
        lingkungan: i64,
        sosial: i64,
        masjid: i64,
        status: IuranStatus,
    ) -> Iuran {
        Iuran {
            id: id.to_string(),
            warga_id: warga_id.to_string(),
            bulan,
            tahun,
            iuran_lingkungan: lingkungan,
            iuran_sosial: sosial,
            iuran_masjid: masjid,
            tanggal_bayar: None,
            status,
            metode_bayar: None,
            dicatat_oleh: None,
            bukti_url: None,
            catatan: None,
        }
    }

    fn pengeluaran(id: &str, tanggal: &str, kategori: &str, jumlah: i64) -> Pengeluaran {
        Pengeluaran {
            id: id.to_string(),
            tanggal: tanggal.to_string(),
            kategori: kategori.to_string(),
            jumlah,
            ..Default::default()
        }
    }

    /// A dues record never stores its total; it is always the sum of the
    /// three components.
    #[test]
    fn test_iuran_total() {
        let i = iuran("IU-1", "W-1", Bulan::Agustus, 2025, 15000, 5000, 10000, IuranStatus::Lunas);
        assert_eq!(i.total(), 30000);
        assert!(i.is_lunas());

        let belum = iuran("IU-2", "W-1", Bulan::Agustus, 2025, 15000, 0, 0, IuranStatus::BelumLunas);
        assert!(!belum.is_lunas());
    }

    #[test]
    fn test_date_parsing() {
        use crate::logic::dates::parse_date_safe;
        use chrono::NaiveDate;

        assert_eq!(
            parse_date_safe("2025-08-17"),
            Some(NaiveDate::from_ymd_opt(2025, 8, 17).unwrap())
        );
        assert_eq!(
            parse_date_safe("20250817"),
            Some(NaiveDate::from_ymd_opt(2025, 8, 17).unwrap())
        );
        assert_eq!(parse_date_safe("invalid"), None);
        assert_eq!(parse_date_safe(""), None);
    }

    /// Sheet cells typed by hand arrive as numbers, numeric strings or
    /// blanks. All of them must read, with 0 as the fallback.
    #[test]
    fn test_lenient_amount_parsing() {
        let row = serde_json::json!({
            "id": "IU-9",
            "warga_id": "W-1",
            "bulan": "Agustus",
            "tahun": "2025",
            "iuran_lingkungan": "15000",
            "iuran_sosial": 5000.4,
            "iuran_masjid": "",
            "status": "Lunas",
        });
        let parsed: Iuran = serde_json::from_value(row).unwrap();
        assert_eq!(parsed.tahun, 2025);
        assert_eq!(parsed.iuran_lingkungan, 15000);
        assert_eq!(parsed.iuran_sosial, 5000); // 5000.4 rounds to 5000
        assert_eq!(parsed.iuran_masjid, 0);
    }

    /// Unrecognized sheet values must fail closed: an unknown role gets no
    /// access anywhere, an unknown payment status reads as unpaid.
    #[test]
    fn test_unrecognized_values_fail_closed() {
        let role: Role = serde_json::from_value(serde_json::json!("superuser")).unwrap();
        assert_eq!(role, Role::Unknown);

        let status: IuranStatus = serde_json::from_value(serde_json::json!("Nunggak")).unwrap();
        assert_eq!(status, IuranStatus::BelumLunas);
        let status: IuranStatus = serde_json::from_value(serde_json::json!("Belum Lunas")).unwrap();
        assert_eq!(status, IuranStatus::BelumLunas);
        let status: IuranStatus = serde_json::from_value(serde_json::json!("Lunas")).unwrap();
        assert_eq!(status, IuranStatus::Lunas);
    }

    #[test]
    fn test_vacant_unit_detection() {
        assert!(warga("W-1", "", "A", "1").is_vacant());
        assert!(warga("W-2", "Kosong", "A", "2").is_vacant());
        assert!(warga("W-3", "  Kosong  ", "A", "3").is_vacant());
        assert!(!warga("W-4", "Budi Santoso", "A", "4").is_vacant());
    }

    /// Member rows follow the same convention as vacant units.
    #[test]
    fn test_placeholder_member_detection() {
        let anggota = |nama: &str| AnggotaKeluarga {
            id: "A-1".to_string(),
            warga_id: "W-1".to_string(),
            nama: nama.to_string(),
            ..Default::default()
        };
        assert!(anggota("").is_placeholder());
        assert!(anggota("Kosong").is_placeholder());
        assert!(anggota("  Kosong  ").is_placeholder());
        assert!(!anggota("Dewi Lestari").is_placeholder());
    }

    #[test]
    fn test_trailing_months_crosses_year_boundary() {
        use crate::logic::dates::{month_label, trailing_months};
        use chrono::NaiveDate;

        let today = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        let months = trailing_months(today, 6);
        // Aug 2024 .. Jan 2025, oldest first
        assert_eq!(months.len(), 6);
        assert_eq!(months[0], (Bulan::Agustus, 2024));
        assert_eq!(months[5], (Bulan::Januari, 2025));

        assert_eq!(month_label(Bulan::Agustus, 2025), "Agu 25");
        assert_eq!(month_label(Bulan::Januari, 2003), "Jan 03");
    }

    /// A range whose end month precedes its start month runs into the next
    /// year: November to Februari starting 2024 is four records, two per
    /// year.
    #[test]
    fn test_month_range_wraps_into_next_year() {
        use crate::logic::bulk::expand_month_range;

        let months =
            expand_month_range(Bulan::November, Bulan::Februari, 2024, None).unwrap();
        assert_eq!(
            months,
            vec![
                (Bulan::November, 2024),
                (Bulan::Desember, 2024),
                (Bulan::Januari, 2025),
                (Bulan::Februari, 2025),
            ]
        );

        let same_month = expand_month_range(Bulan::Mei, Bulan::Mei, 2025, None).unwrap();
        assert_eq!(same_month, vec![(Bulan::Mei, 2025)]);

        let full_year =
            expand_month_range(Bulan::Januari, Bulan::Desember, 2025, None).unwrap();
        assert_eq!(full_year.len(), 12);
    }

    #[test]
    fn test_month_range_explicit_end_year() {
        use crate::logic::bulk::expand_month_range;

        // Januari 2024 .. Desember 2025 = 24 records, right at the cap
        let months =
            expand_month_range(Bulan::Januari, Bulan::Desember, 2024, Some(2025)).unwrap();
        assert_eq!(months.len(), 24);
        assert_eq!(months[0], (Bulan::Januari, 2024));
        assert_eq!(months[23], (Bulan::Desember, 2025));

        // One month over the cap is refused
        let too_long = expand_month_range(Bulan::Januari, Bulan::Januari, 2024, Some(2026));
        assert!(too_long.is_err());

        // End year before start year is refused
        let reversed = expand_month_range(Bulan::Januari, Bulan::Desember, 2025, Some(2024));
        assert!(reversed.is_err());
    }

    /// Absurd years are refused before any month arithmetic, including
    /// values extreme enough to overflow it.
    #[test]
    fn test_month_range_rejects_out_of_range_years() {
        use crate::logic::bulk::expand_month_range;

        for tahun in [i32::MIN, 0, 1899, 10000, i32::MAX] {
            assert!(
                expand_month_range(Bulan::November, Bulan::Februari, tahun, None).is_err(),
                "tahun {} lolos validasi",
                tahun
            );
        }

        // An out-of-window explicit end year is refused the same way
        assert!(expand_month_range(Bulan::Januari, Bulan::Januari, 2024, Some(10000)).is_err());

        // The window edges themselves work
        assert!(expand_month_range(Bulan::Januari, Bulan::Desember, 1900, None).is_ok());
        assert!(expand_month_range(Bulan::Desember, Bulan::Desember, 9999, None).is_ok());
    }

    #[test]
    fn test_scope_warga_by_role() {
        use crate::logic::scope::{scope_warga, ScopeContext};

        let semua = vec![
            warga("W-1", "Budi", "A", "1"),
            warga("W-2", "Sari", "A", "2"),
            warga("W-3", "Joko", "B", "1"),
        ];

        let admin = ScopeContext::new(Role::Admin, None, None);
        assert_eq!(scope_warga(&admin, semua.clone()).len(), 3);

        let pengawas = ScopeContext::new(Role::Pengawas, None, None);
        assert_eq!(scope_warga(&pengawas, semua.clone()).len(), 3);

        let koordinator = ScopeContext::new(Role::Koordinator, None, Some("A".to_string()));
        let milik_a = scope_warga(&koordinator, semua.clone());
        assert_eq!(milik_a.len(), 2);
        assert!(milik_a.iter().all(|w| w.blok == "A"));

        let user = ScopeContext::new(Role::User, Some("W-3".to_string()), None);
        let milik_user = scope_warga(&user, semua.clone());
        assert_eq!(milik_user.len(), 1);
        assert_eq!(milik_user[0].id, "W-3");

        let unknown = ScopeContext::new(Role::Unknown, Some("W-1".to_string()), None);
        assert!(scope_warga(&unknown, semua.clone()).is_empty());

        // A koordinator without an assigned blok sees nothing
        let tanpa_blok = ScopeContext::new(Role::Koordinator, None, None);
        assert!(scope_warga(&tanpa_blok, semua).is_empty());
    }

    /// A resident keeps seeing their own dues even if the owning registry
    /// row was deleted, because their scope matches on the foreign key. A
    /// koordinator needs the owner row to resolve the blok, so for them an
    /// orphaned record drops out.
    #[test]
    fn test_owned_records_survive_missing_owner() {
        use crate::logic::enrich::index_warga;
        use crate::logic::scope::{scope_by_owner, ScopeContext};

        let terdaftar = vec![warga("W-1", "Budi", "A", "1")];
        let index = index_warga(&terdaftar);

        let catatan = vec![
            iuran("IU-1", "W-1", Bulan::Juli, 2025, 10000, 0, 0, IuranStatus::Lunas),
            iuran("IU-2", "W-99", Bulan::Juli, 2025, 10000, 0, 0, IuranStatus::Lunas),
        ];

        let user = ScopeContext::new(Role::User, Some("W-99".to_string()), None);
        let milik_user = scope_by_owner(&user, catatan.clone(), &index, |i| &i.warga_id);
        assert_eq!(milik_user.len(), 1);
        assert_eq!(milik_user[0].id, "IU-2");

        let koordinator = ScopeContext::new(Role::Koordinator, None, Some("A".to_string()));
        let milik_blok = scope_by_owner(&koordinator, catatan, &index, |i| &i.warga_id);
        assert_eq!(milik_blok.len(), 1);
        assert_eq!(milik_blok[0].id, "IU-1");
    }

    /// Records pointing at a deleted resident still render, with
    /// placeholder owner fields instead of an error.
    #[test]
    fn test_enrichment_handles_missing_owner() {
        use crate::logic::enrich::{enrich_iuran, index_warga, PEMILIK_TIDAK_DIKETAHUI};

        let terdaftar = vec![warga("W-1", "Budi", "A", "7")];
        let index = index_warga(&terdaftar);

        let views = enrich_iuran(
            vec![
                iuran("IU-1", "W-1", Bulan::Juli, 2025, 10000, 0, 0, IuranStatus::Lunas),
                iuran("IU-2", "W-99", Bulan::Juli, 2025, 5000, 0, 0, IuranStatus::Lunas),
            ],
            &index,
        );

        assert_eq!(views[0].nama_warga, "Budi");
        assert_eq!(views[0].alamat, "Blok A/7");
        assert_eq!(views[0].blok, "A");

        assert_eq!(views[1].nama_warga, PEMILIK_TIDAK_DIKETAHUI);
        assert_eq!(views[1].alamat, PEMILIK_TIDAK_DIKETAHUI);
        assert_eq!(views[1].blok, "");
    }

    #[test]
    fn test_warga_stats_excludes_vacant_units() {
        use crate::logic::stats::warga_stats;

        let semua = vec![
            warga("W-1", "Budi", "A", "1"),
            warga("W-2", "Kosong", "A", "2"),
            warga("W-3", "Sari", "B", "1"),
        ];
        let stats = warga_stats(&semua);
        assert_eq!(stats.total_unit, 3);
        assert_eq!(stats.total_aktif, 2);
        assert_eq!(stats.per_status.len(), 1);
        assert_eq!(stats.per_status[0].status, "Tetap");
        assert_eq!(stats.per_status[0].jumlah, 2);
    }

    #[test]
    fn test_demografi_counts_heads_and_members() {
        use crate::logic::stats::demografi_stats;

        let mut sari = warga("W-2", "Sari", "B", "1");
        sari.jenis_kelamin = "P".to_string();
        let semua = vec![
            warga("W-1", "Budi", "A", "1"),
            sari,
            warga("W-3", "Kosong", "A", "2"),
        ];
        let anggota = vec![
            AnggotaKeluarga {
                id: "A-1".to_string(),
                warga_id: "W-1".to_string(),
                nama: "Dewi".to_string(),
                jenis_kelamin: "P".to_string(),
                ..Default::default()
            },
            // Placeholder row, not a person
            AnggotaKeluarga {
                id: "A-2".to_string(),
                warga_id: "W-1".to_string(),
                nama: "Kosong".to_string(),
                ..Default::default()
            },
            // Member of a household that no longer exists
            AnggotaKeluarga {
                id: "A-3".to_string(),
                warga_id: "W-99".to_string(),
                nama: "Rudi".to_string(),
                jenis_kelamin: "L".to_string(),
                ..Default::default()
            },
        ];

        let stats = demografi_stats(&semua, &anggota);
        // Budi + Sari + Dewi + Rudi; the vacant unit and placeholder do not count
        assert_eq!(stats.total_jiwa, 4);
        assert_eq!(stats.laki_laki, 2);
        assert_eq!(stats.perempuan, 2);

        let na = stats.per_blok.iter().find(|b| b.blok == "N/A").unwrap();
        assert_eq!(na.jumlah, 1);
        let blok_a = stats.per_blok.iter().find(|b| b.blok == "A").unwrap();
        assert_eq!(blok_a.jumlah, 2);
    }

    #[test]
    fn test_iuran_bulan_ini_filters_month_and_status() {
        use crate::logic::stats::iuran_bulan_ini;
        use chrono::NaiveDate;

        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let catatan = vec![
            iuran("IU-1", "W-1", Bulan::Agustus, 2025, 10000, 5000, 0, IuranStatus::Lunas),
            iuran("IU-2", "W-2", Bulan::Agustus, 2025, 0, 0, 20000, IuranStatus::Lunas),
            // Unpaid and wrong-month records never reach the sums
            iuran("IU-3", "W-3", Bulan::Agustus, 2025, 99999, 0, 0, IuranStatus::BelumLunas),
            iuran("IU-4", "W-4", Bulan::Juli, 2025, 7000, 0, 0, IuranStatus::Lunas),
            iuran("IU-5", "W-5", Bulan::Agustus, 2024, 7000, 0, 0, IuranStatus::Lunas),
        ];

        let stats = iuran_bulan_ini(&catatan, 8, today);
        assert_eq!(stats.bulan, "Agustus");
        assert_eq!(stats.tahun, 2025);
        assert_eq!(stats.jumlah_lunas, 2);
        assert_eq!(stats.total_lingkungan, 10000);
        assert_eq!(stats.total_sosial, 5000);
        assert_eq!(stats.total_masjid, 20000);
        assert_eq!(stats.total, 35000);
        // 2 of 8 = 25%
        assert_eq!(stats.persentase, 25);
    }

    /// An empty community must produce a zero dashboard, not a division
    /// error.
    #[test]
    fn test_percentage_zero_when_no_active_residents() {
        use crate::logic::stats::iuran_bulan_ini;
        use chrono::NaiveDate;

        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let stats = iuran_bulan_ini(&[], 0, today);
        assert_eq!(stats.persentase, 0);
        assert_eq!(stats.jumlah_lunas, 0);
        assert_eq!(stats.total, 0);

        // 3 of 8 = 37.5, rounds to 38
        let catatan = vec![
            iuran("IU-1", "W-1", Bulan::Agustus, 2025, 100, 0, 0, IuranStatus::Lunas),
            iuran("IU-2", "W-2", Bulan::Agustus, 2025, 100, 0, 0, IuranStatus::Lunas),
            iuran("IU-3", "W-3", Bulan::Agustus, 2025, 100, 0, 0, IuranStatus::Lunas),
        ];
        assert_eq!(iuran_bulan_ini(&catatan, 8, today).persentase, 38);
    }

    /// A brand-new community with no rows at all yields an all-zero
    /// dashboard.
    #[test]
    fn test_dashboard_zero_defaults_on_empty_inputs() {
        use crate::logic::stats::compute_dashboard_stats;
        use chrono::NaiveDate;

        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let stats = compute_dashboard_stats(&[], &[], &[], &[], &[], today);

        assert_eq!(stats.warga.total_unit, 0);
        assert_eq!(stats.warga.total_aktif, 0);
        assert_eq!(stats.demografi.total_jiwa, 0);
        assert_eq!(stats.iuran_bulan_ini.persentase, 0);
        assert_eq!(stats.pengeluaran_bulan_ini.total, 0);
        assert_eq!(stats.saldo.saldo, 0);
        assert_eq!(stats.tren.len(), 6);
        assert!(stats.tren.iter().all(|t| t.pemasukan == 0 && t.pengeluaran == 0));
    }

    #[test]
    fn test_saldo_all_time() {
        use crate::logic::stats::saldo_stats;

        let catatan = vec![
            iuran("IU-1", "W-1", Bulan::Juni, 2025, 10000, 5000, 0, IuranStatus::Lunas),
            iuran("IU-2", "W-2", Bulan::Juli, 2025, 10000, 0, 0, IuranStatus::BelumLunas),
        ];
        let pemasukan = vec![PemasukanLain {
            id: "PM-1".to_string(),
            tanggal: "2025-07-01".to_string(),
            deskripsi: "Sewa aula".to_string(),
            jumlah: 250000,
            ..Default::default()
        }];
        let keluar = vec![pengeluaran("PG-1", "2025-07-02", "Kebersihan", 40000)];

        let saldo = saldo_stats(&catatan, &pemasukan, &keluar);
        // 15000 paid dues + 250000 other income = 265000 in
        assert_eq!(saldo.total_pemasukan, 265000);
        assert_eq!(saldo.total_pengeluaran, 40000);
        assert_eq!(saldo.saldo, 225000);
    }

    /// Dues land on the chart in the month they were paid, not the month
    /// they were billed for.
    #[test]
    fn test_tren_uses_payment_date() {
        use crate::logic::stats::tren_enam_bulan;
        use chrono::NaiveDate;

        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

        // Billed for Maret, paid in Juli
        let mut telat = iuran("IU-1", "W-1", Bulan::Maret, 2025, 12000, 0, 0, IuranStatus::Lunas);
        telat.tanggal_bayar = Some("2025-07-03".to_string());
        // Paid but with no payment date recorded
        let tanpa_tanggal =
            iuran("IU-2", "W-2", Bulan::Juli, 2025, 9000, 0, 0, IuranStatus::Lunas);

        let keluar = vec![pengeluaran("PG-1", "2025-08-01", "Keamanan", 30000)];

        let tren = tren_enam_bulan(&[telat, tanpa_tanggal], &[], &keluar, today);
        assert_eq!(tren.len(), 6);
        // Oldest first: Mar 25 .. Agu 25
        assert_eq!(tren[0].label, "Mar 25");
        assert_eq!(tren[5].label, "Agu 25");

        let juli = tren.iter().find(|t| t.label == "Jul 25").unwrap();
        assert_eq!(juli.pemasukan, 12000);
        let agustus = tren.iter().find(|t| t.label == "Agu 25").unwrap();
        assert_eq!(agustus.pemasukan, 0);
        assert_eq!(agustus.pengeluaran, 30000);
        // The undated payment never shows up anywhere
        let total_chart: i64 = tren.iter().map(|t| t.pemasukan).sum();
        assert_eq!(total_chart, 12000);
    }

    /// The collection report is deterministic: same rows in any order give
    /// the same groups, and the grand total is exactly the sum of the
    /// month subtotals.
    #[test]
    fn test_laporan_iuran_grouping_and_totals() {
        use crate::logic::enrich::{enrich_iuran, index_warga};
        use crate::logic::report::laporan_iuran;

        let terdaftar = vec![
            warga("W-1", "Budi", "A", "1"),
            warga("W-2", "Sari", "B", "1"),
            warga("W-3", "Joko", "A", "2"),
        ];
        let index = index_warga(&terdaftar);

        let mut catatan = vec![
            iuran("IU-1", "W-1", Bulan::Juli, 2025, 10000, 0, 0, IuranStatus::Lunas),
            iuran("IU-2", "W-2", Bulan::Juli, 2025, 20000, 0, 0, IuranStatus::Lunas),
            iuran("IU-3", "W-3", Bulan::Agustus, 2025, 15000, 0, 0, IuranStatus::Lunas),
            iuran("IU-4", "W-1", Bulan::Agustus, 2025, 15000, 0, 0, IuranStatus::BelumLunas),
        ];

        let laporan = laporan_iuran(enrich_iuran(catatan.clone(), &index));

        // Months newest first; the unpaid row is gone
        assert_eq!(laporan.grup.len(), 2);
        assert_eq!(laporan.grup[0].bulan, "Agustus");
        assert_eq!(laporan.grup[0].subtotal, 15000);
        assert_eq!(laporan.grup[1].bulan, "Juli");
        assert_eq!(laporan.grup[1].subtotal, 30000);
        assert_eq!(laporan.total, 45000);

        // Within Juli the bloks are ascending
        let juli = &laporan.grup[1];
        assert_eq!(juli.grup_blok[0].blok, "A");
        assert_eq!(juli.grup_blok[1].blok, "B");

        // Shuffled input, identical report
        catatan.reverse();
        let ulang = laporan_iuran(enrich_iuran(catatan, &index));
        assert_eq!(
            serde_json::to_value(&laporan).unwrap(),
            serde_json::to_value(&ulang).unwrap()
        );
    }

    #[test]
    fn test_laporan_pengeluaran_undated_bucket() {
        use crate::logic::report::laporan_pengeluaran;

        let laporan = laporan_pengeluaran(vec![
            pengeluaran("PG-1", "2025-08-01", "Keamanan", 30000),
            pengeluaran("PG-2", "2025-07-10", "Kebersihan", 20000),
            pengeluaran("PG-3", "tanggal rusak", "Lainnya", 5000),
        ]);

        assert_eq!(laporan.grup.len(), 3);
        assert_eq!(laporan.grup[0].label, "Agustus 2025");
        assert_eq!(laporan.grup[1].label, "Juli 2025");
        // Unparseable dates are kept, in a trailing bucket
        assert_eq!(laporan.grup[2].label, "Tanpa Tanggal");
        assert_eq!(laporan.grup[2].subtotal, 5000);
        assert_eq!(laporan.total, 55000);
    }

    #[test]
    fn test_laporan_warga_orders_house_numbers_numerically() {
        use crate::logic::report::laporan_warga;

        let laporan = laporan_warga(vec![
            warga("W-1", "Budi", "A", "10"),
            warga("W-2", "Sari", "A", "2"),
            warga("W-3", "Kosong", "A", "3"),
            warga("W-4", "Joko", "", "1"),
        ]);

        // Blank blok groups under N/A; vacant units still appear
        assert_eq!(laporan.grup.len(), 2);
        assert_eq!(laporan.grup[0].blok, "A");
        assert_eq!(laporan.grup[1].blok, "N/A");
        assert_eq!(laporan.total, 4);

        let nomor: Vec<&str> = laporan.grup[0]
            .daftar
            .iter()
            .map(|w| w.nomor_rumah.as_str())
            .collect();
        // 2 < 3 < 10, not lexicographic
        assert_eq!(nomor, vec!["2", "3", "10"]);
    }

    #[test]
    fn test_laporan_anggota_groups_by_household_blok() {
        use crate::logic::enrich::{enrich_anggota, index_warga};
        use crate::logic::report::laporan_anggota;

        let terdaftar = vec![warga("W-1", "Budi", "A", "1")];
        let index = index_warga(&terdaftar);

        let anggota = vec![
            AnggotaKeluarga {
                id: "A-1".to_string(),
                warga_id: "W-1".to_string(),
                nama: "Dewi".to_string(),
                ..Default::default()
            },
            AnggotaKeluarga {
                id: "A-2".to_string(),
                warga_id: "W-99".to_string(),
                nama: "Rudi".to_string(),
                ..Default::default()
            },
        ];

        let laporan = laporan_anggota(enrich_anggota(anggota, &index));
        assert_eq!(laporan.grup.len(), 2);
        assert_eq!(laporan.grup[0].blok, "A");
        assert_eq!(laporan.grup[0].jumlah, 1);
        // Orphaned members land in the N/A group instead of disappearing
        assert_eq!(laporan.grup[1].blok, "N/A");
        assert_eq!(laporan.grup[1].daftar[0].nama_kepala, "Tidak Diketahui");
        assert_eq!(laporan.total, 2);
    }
}
