mod palette_tests;
