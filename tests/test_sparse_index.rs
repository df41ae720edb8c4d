//! End-to-end `SparseIndex::load` + `project` tests (spec.md §8 scenarios
//! S1–S3), built over a real on-disk fixture directory rather than the
//! in-memory `IndexData` the unit tests in `sparse_index.rs` construct
//! directly.

mod common;

use common::{canon_of, seq_codes, ExtEntry, Fixture};
use pufferfish_core::index::SparseIndex;
use pufferfish_core::kmer::CanonicalKmer;

/// S1 (single unitig, all k-mers sampled): exact lookup in both identity
/// and twin orientation.
#[test]
fn s1_exact_lookup_identity_and_twin() {
    let seq = b"ACGTACGTAC";
    let k = 5u8;
    let fixture = Fixture {
        k,
        extension_size: 0,
        seq_codes: seq_codes(seq),
        boundary_positions: vec![seq.len() - 1],
        keys: vec![canon_of(b"ACGTA")],
        presence: vec![true],
        sampled_positions: vec![0],
        extensions: vec![],
        contig_offsets: vec![0, 1],
        uref: vec![0],
        upos_packed: vec![(100u64 << 1) | 1],
        ref_names: vec!["chr1".to_string()],
    };

    let dir = tempfile::tempdir().unwrap();
    fixture.write(dir.path());
    let index = SparseIndex::load(dir.path()).unwrap();

    let fw = CanonicalKmer::from_seq(b"ACGTA").unwrap();
    let hit = index.project(&fw);
    assert!(!hit.is_empty());
    assert_eq!(hit.contig_idx, 0);
    assert_eq!(hit.contig_pos, 0);
    assert!(hit.contig_orientation);
    assert_eq!(hit.contig_len, 10);

    let twin = CanonicalKmer::from_seq(b"TACGT").unwrap();
    let hit2 = index.project(&twin);
    assert!(!hit2.is_empty());
    assert_eq!(hit2.contig_idx, hit.contig_idx);
    assert_eq!(hit2.contig_pos, hit.contig_pos);
    assert!(!hit2.contig_orientation);

    let (ref_id, ref_pos, ref_fw) = index.ref_range(&hit).next().unwrap();
    assert_eq!(ref_id, 0);
    assert_eq!(ref_pos, 100);
    assert!(ref_fw);
}

/// S2 (boundary rejection): a window spanning two unitigs was never a
/// member of the index to begin with (construction only samples valid,
/// non-crossing k-mer positions), so `project` returns the empty
/// sentinel via the ordinary "absent k-mer" path (spec.md §4.3 step 2).
#[test]
fn s2_window_spanning_two_unitigs_is_never_indexed() {
    let seq = b"ACGTAGGGGG"; // unitig0="ACGTA", unitig1="GGGGG"
    let k = 5u8;
    let fixture = Fixture {
        k,
        extension_size: 0,
        seq_codes: seq_codes(seq),
        boundary_positions: vec![4, 9],
        keys: vec![canon_of(b"ACGTA"), canon_of(b"GGGGG")],
        presence: vec![true, true],
        sampled_positions: vec![0, 5],
        extensions: vec![],
        contig_offsets: vec![0, 1, 2],
        uref: vec![0, 0],
        upos_packed: vec![(0u64 << 1) | 1, (5u64 << 1) | 1],
        ref_names: vec!["chr1".to_string()],
    };

    let dir = tempfile::tempdir().unwrap();
    fixture.write(dir.path());
    let index = SparseIndex::load(dir.path()).unwrap();

    // Valid members at both unitigs' k-mer positions still resolve.
    assert!(!index.project(&CanonicalKmer::from_seq(b"ACGTA").unwrap()).is_empty());
    assert!(!index.project(&CanonicalKmer::from_seq(b"GGGGG").unwrap()).is_empty());

    // GTAGG (read starting at position 2) crosses the boundary and was
    // never sampled/hashed, so the lookup is rejected at the MPHF step.
    let crossing = CanonicalKmer::from_seq(b"GTAGG").unwrap();
    assert!(index.project(&crossing).is_empty());
}

/// S3 (walk recovery): ACGTA is unsampled and recovers CGTAG's sampled
/// position via a single forward shift of base 'G', then corrects it by
/// the accumulated signed shift.
#[test]
fn s3_walk_recovers_unsampled_kmer_position() {
    let seq = b"ACGTAG";
    let k = 5u8;
    let fixture = Fixture {
        k,
        extension_size: 4,
        seq_codes: seq_codes(seq),
        boundary_positions: vec![seq.len() - 1],
        keys: vec![canon_of(b"ACGTA"), canon_of(b"CGTAG")],
        presence: vec![false, true],
        sampled_positions: vec![1],
        extensions: vec![ExtEntry {
            codes: vec![2], // base code for 'G'
            dir_fw: true,
            canonical: true,
        }],
        contig_offsets: vec![0, 1],
        uref: vec![0],
        upos_packed: vec![(100u64 << 1) | 1],
        ref_names: vec!["chr1".to_string()],
    };

    let dir = tempfile::tempdir().unwrap();
    fixture.write(dir.path());
    let index = SparseIndex::load(dir.path()).unwrap();

    let hit = index.project(&CanonicalKmer::from_seq(b"ACGTA").unwrap());
    assert!(!hit.is_empty());
    assert_eq!(hit.contig_idx, 0);
    assert_eq!(hit.contig_pos, 0);
    assert!(hit.contig_orientation);

    // The sampled neighbour resolves directly, no walk involved.
    let hit2 = index.project(&CanonicalKmer::from_seq(b"CGTAG").unwrap());
    assert!(!hit2.is_empty());
    assert_eq!(hit2.contig_pos, 1);
}

#[test]
fn validate_structure_reports_no_problems_for_a_well_formed_fixture() {
    let seq = b"ACGTACGTAC";
    let k = 5u8;
    let fixture = Fixture {
        k,
        extension_size: 0,
        seq_codes: seq_codes(seq),
        boundary_positions: vec![seq.len() - 1],
        keys: vec![canon_of(b"ACGTA")],
        presence: vec![true],
        sampled_positions: vec![0],
        extensions: vec![],
        contig_offsets: vec![0, 1],
        uref: vec![0],
        upos_packed: vec![(100u64 << 1) | 1],
        ref_names: vec!["chr1".to_string()],
    };
    let dir = tempfile::tempdir().unwrap();
    fixture.write(dir.path());
    let index = SparseIndex::load(dir.path()).unwrap();
    assert!(index.validate_structure().is_empty());
    assert_eq!(index.num_unitigs(), 1);
    assert_eq!(index.num_sampled_kmers(), 1);
}
