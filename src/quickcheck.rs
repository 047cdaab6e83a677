use quickcheck::{Arbitrary, Gen};
use super::{Datum, Dict, Flags};

const PREDEFINED: [Flags; 4] = [Flags::INT_INT, Flags::INT_STR, Flags::STR_INT, Flags::STR_STR];

fn datum(n: i64, string: bool) -> Datum {
    if string { Datum::from(n.to_string()) } else { Datum::Int(n) }
}

/// Generates a predefined dictionary of any mode, holding integers or their decimal spellings.
impl Arbitrary for Dict {
    fn arbitrary(g: &mut Gen) -> Self {
        let flags = g.choose(&PREDEFINED).cloned().unwrap_or_default();
        let mut dict = Dict::predefined(flags).unwrap_or_default();
        let (str_key, str_val) = (dict.flags().contains(Flags::STR_KEY),
                                  dict.flags().contains(Flags::STR_VAL));

        // Both halves are spelled the way the chosen mode stores them.
        for (key, value) in Vec::<(i64, i64)>::arbitrary(g) {
            dict.insert_owned(datum(key, str_key), datum(value, str_val));
        }

        dict
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let dict = self.clone();
        let keys: Vec<Datum> = self.keys().cloned().collect();

        Box::new(keys.into_iter().map(move |key| {
            let mut smaller = dict.clone();
            smaller.delete(&key);
            smaller
        }))
    }
}
