use language_utils::PhraseRecord;

/// Buffers phrase records until the batch is closed.
///
/// Records are kept exactly as received: duplicates are retained and
/// count fully in the frequency statistics.
#[derive(Debug, Default)]
pub struct RecordAccumulator {
    records: Vec<PhraseRecord>,
}

impl RecordAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, record: PhraseRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hands over the whole batch in arrival order.
    pub fn finalize(self) -> Vec<PhraseRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_duplicates_in_order() {
        let mut accumulator = RecordAccumulator::new();
        accumulator.accept(PhraseRecord::new("carpe diem", "seize the day"));
        accumulator.accept(PhraseRecord::new("alea iacta est", "the die is cast"));
        accumulator.accept(PhraseRecord::new("carpe diem", "seize the day"));

        let batch = accumulator.finalize();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], batch[2]);
        assert_eq!(batch[1].source_phrase, "alea iacta est");
    }

    #[test]
    fn test_empty_batch() {
        assert!(RecordAccumulator::new().finalize().is_empty());
    }
}
