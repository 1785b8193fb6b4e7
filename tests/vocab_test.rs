use dpcnn_data::{CachePolicy, UNK_ID, Vocab, VocabCache, count_freqs, filter_lowfreq_words};

fn corpus() -> Vec<Vec<String>> {
    [
        vec!["比赛", "球员", "比赛", "教练", "比赛"],
        vec!["股市", "球员", "基金", "股市"],
        vec!["房价", "比赛", "基金"],
    ]
    .into_iter()
    .map(|doc| doc.into_iter().map(String::from).collect())
    .collect()
}

#[test]
fn test_ids_non_increasing_in_frequency() {
    let freqs = count_freqs(&corpus());
    let vocab = Vocab::from_freqs(freqs.clone(), 100);

    for (a, ca) in &freqs {
        for (b, cb) in &freqs {
            if ca > cb {
                assert!(
                    vocab.encode(a).unwrap() < vocab.encode(b).unwrap(),
                    "{}({}) 应排在 {}({}) 之前",
                    a,
                    ca,
                    b,
                    cb
                );
            }
        }
    }
    assert_eq!(vocab.encode("比赛"), Some(1));
}

#[test]
fn test_unknown_words_map_to_zero() {
    let vocab = Vocab::from_freqs(count_freqs(&corpus()), 100);
    assert_eq!(vocab.unk_id(), UNK_ID);
    assert_eq!(vocab.numericalize(&["火星", "比赛"]), vec![0, 1]);
}

#[test]
fn test_remapped_ids_within_cap() {
    let vocab = Vocab::from_freqs(count_freqs(&corpus()), 100);
    let ids: Vec<Vec<usize>> = corpus().iter().map(|d| vocab.numericalize(d)).collect();

    let cap = 3;
    let once = filter_lowfreq_words(&ids, cap);
    assert!(once.iter().flatten().all(|&id| id < cap));
    assert_eq!(filter_lowfreq_words(&once, cap), once);
    // 顺序与长度不变
    for (before, after) in ids.iter().zip(&once) {
        assert_eq!(before.len(), after.len());
        for (&b, &a) in before.iter().zip(after) {
            assert_eq!(a, if b < cap { b } else { 0 });
        }
    }
}

#[test]
fn test_vocab_from_cache_matches_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let cache = VocabCache::new(dir.path().join("counter.bin"), CachePolicy::Strict);
    assert!(!cache.exists());

    let built = cache.load_or_build(&corpus(), 4, true).unwrap();
    assert!(cache.exists());
    let reloaded = cache.load_or_build(&corpus(), 4, true).unwrap();

    assert_eq!(built, reloaded);
    assert_eq!(built, Vocab::from_freqs(count_freqs(&corpus()), 4));
}
