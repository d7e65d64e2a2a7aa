use super::Connector;

impl Connector {
    // num_right, num_left
    // r0 l0
    // r0 l1
    // r0 l2
    // ...
    pub fn from_lines<I, L>(mut lines: I) -> Self
    where
        I: Iterator<Item = L>,
        L: AsRef<str>,
    {
        let (num_right, num_left) = Self::parse_header(lines.next().unwrap().as_ref());
        let mut data = vec![0; num_right * num_left];
        for line in lines {
            let line = line.as_ref();
            if !line.is_empty() {
                let (right_id, left_id, cost) = Self::parse_body(line);
                data[left_id * num_right + right_id] = cost;
            }
        }
        Self::new(data, num_right, num_left)
    }

    fn parse_header(line: &str) -> (usize, usize) {
        let items: Vec<_> = line.split(' ').collect();
        assert_eq!(items.len(), 2, "{:?}", &items);
        (items[0].parse().unwrap(), items[1].parse().unwrap())
    }

    fn parse_body(line: &str) -> (usize, usize, i16) {
        let items: Vec<_> = line.split(' ').collect();
        assert_eq!(items.len(), 3, "{:?}", &items);
        (
            items[0].parse().unwrap(),
            items[1].parse().unwrap(),
            items[2].parse().unwrap(),
        )
    }
}
