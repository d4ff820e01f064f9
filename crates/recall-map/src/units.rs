macro_rules! def_units {
    ($t: ident, $unit: literal) => {
        #[doc = concat!("Denotes that the inner `T` is given in units of ", $unit, ".")]
        #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
        pub struct $t<T>(pub T);

        impl<T> $t<T> {
            pub fn map<S>(self, mut f: impl FnMut(T) -> S) -> $t<S> {
                $t(f(self.0))
            }
        }
    };
}

def_units!(SquareUnits, "map squares");
def_units!(SubmapUnits, "submaps");
def_units!(RegionUnits, "regions");
